use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Task;
use crate::utils::grouping::group_by;

/// Trailing fetch window for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingWindow {
    Week,
    Month,
    Quarter,
}

impl TrailingWindow {
    pub fn days(self) -> i64 {
        match self {
            TrailingWindow::Week => 7,
            TrailingWindow::Month => 30,
            TrailingWindow::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(TrailingWindow::Week),
            30 => Some(TrailingWindow::Month),
            90 => Some(TrailingWindow::Quarter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrailingWindow::Week => "Last 7 days",
            TrailingWindow::Month => "Last 30 days",
            TrailingWindow::Quarter => "Last 3 months",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TrailingWindow::Week => TrailingWindow::Month,
            TrailingWindow::Month => TrailingWindow::Quarter,
            TrailingWindow::Quarter => TrailingWindow::Week,
        }
    }

    /// Lower bound of the fetch: `today - N days`.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days())
    }
}

/// Aggregates for the dashboard tiles, in hours except `total`.
///
/// All three duration figures are computed from the fetched window only: a
/// window narrower than the containing week or month undercounts those
/// aggregates. That matches the shipped behavior and stays as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub total: usize,
}

impl DashboardStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let week_start = start_of_week(today);
        let month_start = today.with_day(1).unwrap_or(today);

        Self {
            today: hours_where(tasks, |t| t.date == today),
            week: hours_where(tasks, |t| t.date >= week_start && t.date <= today),
            month: hours_where(tasks, |t| t.date >= month_start && t.date <= today),
            total: tasks.len(),
        }
    }
}

fn hours_where(tasks: &[Task], pred: impl Fn(&Task) -> bool) -> f64 {
    tasks
        .iter()
        .filter(|t| pred(t))
        .map(|t| t.total_minutes)
        .sum::<i64>() as f64
        / 60.0
}

/// The week starts on Sunday.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Chart series: total hours per distinct calendar date present in the
/// fetched set. Order follows first occurrence, which for a date-ordered
/// fetch is date order. Days with no tasks get no point.
pub fn daily_series(tasks: &[Task]) -> Vec<(NaiveDate, f64)> {
    group_by(tasks.iter(), |t| t.date)
        .into_iter()
        .map(|(date, group)| {
            let minutes: i64 = group.iter().map(|t| t.total_minutes).sum();
            (date, minutes as f64 / 60.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskProjectRef;
    use uuid::Uuid;

    fn task(date: NaiveDate, hours: i64, minutes: i64) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            project_id: Uuid::nil(),
            task_name: "work".to_string(),
            date,
            hours,
            minutes,
            notes: None,
            total_minutes: hours * 60 + minutes,
            project: TaskProjectRef {
                project_name: "Internal Tools".to_string(),
                icon: None,
            },
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn today_stat_sums_only_tasks_dated_today() {
        // 2026-08-06 is a Thursday.
        let today = d(2026, 8, 6);
        let tasks = vec![
            task(today, 1, 30),
            task(today, 0, 45),
            task(d(2026, 8, 5), 3, 0),
        ];

        let stats = DashboardStats::compute(&tasks, today);
        assert_eq!(stats.today, 2.25);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn week_starts_on_sunday() {
        assert_eq!(start_of_week(d(2026, 8, 6)), d(2026, 8, 2));
        assert_eq!(start_of_week(d(2026, 8, 2)), d(2026, 8, 2));
        assert_eq!(start_of_week(d(2026, 8, 1)), d(2026, 7, 26));
    }

    #[test]
    fn week_and_month_only_count_dates_in_their_ranges() {
        let today = d(2026, 8, 6);
        let tasks = vec![
            task(d(2026, 8, 3), 2, 0),  // this week, this month
            task(d(2026, 8, 1), 1, 0),  // before Sunday, this month
            task(d(2026, 7, 31), 4, 0), // previous month
        ];

        let stats = DashboardStats::compute(&tasks, today);
        assert_eq!(stats.week, 2.0);
        assert_eq!(stats.month, 3.0);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn narrow_window_undercounts_month_without_complaint() {
        // Only the last 7 days were fetched; the month figure reflects just
        // that slice.
        let today = d(2026, 8, 20);
        let fetched = vec![task(d(2026, 8, 15), 2, 0), task(d(2026, 8, 19), 1, 0)];

        let stats = DashboardStats::compute(&fetched, today);
        assert_eq!(stats.month, 3.0);
    }

    #[test]
    fn daily_series_groups_by_date_without_zero_fill() {
        let tasks = vec![
            task(d(2026, 8, 1), 1, 0),
            task(d(2026, 8, 1), 0, 30),
            task(d(2026, 8, 4), 2, 0),
        ];

        let series = daily_series(&tasks);
        assert_eq!(
            series,
            vec![(d(2026, 8, 1), 1.5), (d(2026, 8, 4), 2.0)]
        );
    }

    #[test]
    fn window_bounds() {
        let today = d(2026, 8, 6);
        assert_eq!(TrailingWindow::Week.start(today), d(2026, 7, 30));
        assert_eq!(TrailingWindow::from_days(30), Some(TrailingWindow::Month));
        assert_eq!(TrailingWindow::from_days(14), None);
        assert_eq!(TrailingWindow::Quarter.next(), TrailingWindow::Week);
    }
}
