use chrono::NaiveDate;
use ratatui::style::{Color, Modifier, Style};

pub struct Formatter;

impl Formatter {
    /// Fractional hours for the stat tiles, e.g. `2.3h`.
    pub fn format_hours(hours: f64) -> String {
        format!("{:.1}h", hours)
    }

    /// Whole hours plus remainder minutes, e.g. `2h 15m`.
    pub fn format_hm(total_minutes: i64) -> String {
        format!("{}h {}m", total_minutes / 60, total_minutes % 60)
    }

    /// Long-form date for group headers, e.g. `August 6, 2026`.
    pub fn format_date_long(date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }

    /// Short date for chart axis labels, e.g. `Aug 06`.
    pub fn format_date_short(date: NaiveDate) -> String {
        date.format("%b %d").to_string()
    }

    pub fn format_date_iso(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn create_success_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn create_error_style() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }
}
