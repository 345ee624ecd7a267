use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::{daily_series, DashboardStats, Task, TrailingWindow};
use crate::ui::formatter::Formatter;
use crate::ui::widgets::{ColorScheme, StatTile};

/// Dashboard screen state: the fetched window plus the aggregates derived
/// from it.
pub struct DashboardState {
    pub window: TrailingWindow,
    pub tasks: Vec<Task>,
    pub stats: DashboardStats,
    pub series: Vec<(NaiveDate, f64)>,
}

impl DashboardState {
    pub fn new(window: TrailingWindow) -> Self {
        Self {
            window,
            tasks: Vec::new(),
            stats: DashboardStats {
                today: 0.0,
                week: 0.0,
                month: 0.0,
                total: 0,
            },
            series: Vec::new(),
        }
    }

    /// Replace the fetched window and recompute every derived figure.
    pub fn set_tasks(&mut self, tasks: Vec<Task>, today: NaiveDate) {
        self.stats = DashboardStats::compute(&tasks, today);
        self.series = daily_series(&tasks);
        self.tasks = tasks;
    }

    pub fn cycle_window(&mut self) {
        self.window = self.window.next();
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Range selector line
            Constraint::Length(4), // Stat tiles
            Constraint::Min(8),    // Chart
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("Range: {}  (r to change)", state.window.label()))
            .style(Style::default().fg(ColorScheme::GRAY_TEXT)),
        chunks[0],
    );

    render_stat_tiles(f, chunks[1], &state.stats);
    render_chart(f, chunks[2], &state.series);
}

fn render_stat_tiles(f: &mut Frame, area: Rect, stats: &DashboardStats) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let tiles = [
        ("Today's Total", Formatter::format_hours(stats.today)),
        ("This Week", Formatter::format_hours(stats.week)),
        ("This Month", Formatter::format_hours(stats.month)),
        ("Total Tasks", stats.total.to_string()),
    ];

    for (i, (label, value)) in tiles.iter().enumerate() {
        StatTile::render(f, cols[i], label, value);
    }
}

fn render_chart(f: &mut Frame, area: Rect, series: &[(NaiveDate, f64)]) {
    let block = ColorScheme::base_block("Time Consumption");

    if series.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No tasks in this range")
                .style(Style::default().fg(ColorScheme::GRAY_TEXT)),
            inner,
        );
        return;
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, hours))| (i as f64, *hours))
        .collect();

    let max_hours = series.iter().map(|(_, h)| *h).fold(0.0_f64, f64::max).max(1.0);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = if series.len() == 1 {
        vec![Span::raw(Formatter::format_date_short(series[0].0))]
    } else {
        let mid = series.len() / 2;
        vec![
            Span::raw(Formatter::format_date_short(series[0].0)),
            Span::raw(Formatter::format_date_short(series[mid].0)),
            Span::raw(Formatter::format_date_short(series[series.len() - 1].0)),
        ]
    };

    let y_labels: Vec<Span> = vec![
        Span::raw("0"),
        Span::raw(format!("{:.1}", max_hours / 2.0)),
        Span::raw(format!("{:.1}", max_hours)),
    ];

    let datasets = vec![Dataset::default()
        .name("Total Hours")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(ColorScheme::CLEAN_BLUE))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(ColorScheme::GRAY_TEXT))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    "Hours",
                    Style::default()
                        .fg(ColorScheme::GRAY_TEXT)
                        .add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().fg(ColorScheme::GRAY_TEXT))
                .bounds([0.0, max_hours * 1.1])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
