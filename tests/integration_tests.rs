use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use tally_cli::models::{
    daily_series, Config, DashboardStats, DraftBatch, DraftError, NewTask, Project, ProjectStatus,
    Task, TaskDraft, TaskProjectRef, TrailingWindow, MAX_DRAFTS,
};
use tally_cli::ui::history::{GroupMode, HistoryState};
use tally_cli::ui::icons::ProjectGlyph;
use tally_cli::utils::validation::{validate_batch, ValidationError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2026, 8, 6)
}

fn project(name: &str) -> Project {
    Project {
        id: Uuid::new_v4(),
        project_name: name.to_string(),
        icon: None,
        status: ProjectStatus::Active,
    }
}

fn draft(project: &Project, name: &str, hours: &str, minutes: &str) -> TaskDraft {
    let mut draft = TaskDraft::new(today());
    draft.project_id = Some(project.id);
    draft.task_name = name.to_string();
    draft.hours = hours.to_string();
    draft.minutes = minutes.to_string();
    draft
}

fn task(name: &str, project_name: &str, date: NaiveDate, minutes: i64) -> Task {
    Task {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        project_id: Uuid::nil(),
        task_name: name.to_string(),
        date,
        hours: minutes / 60,
        minutes: minutes % 60,
        notes: None,
        total_minutes: minutes,
        project: TaskProjectRef {
            project_name: project_name.to_string(),
            icon: None,
        },
    }
}

#[test]
fn test_draft_batch_limits() {
    let mut batch = DraftBatch::new(today());

    // Grows one row at a time up to the cap.
    for expected in 2..=MAX_DRAFTS {
        assert!(batch.add(today()).is_ok());
        assert_eq!(batch.len(), expected);
    }

    // The 21st row is rejected and the batch is untouched.
    assert_eq!(batch.add(today()), Err(DraftError::LimitReached));
    assert_eq!(batch.len(), MAX_DRAFTS);

    // Shrink back down to one row, which then refuses to go.
    for _ in 1..MAX_DRAFTS {
        assert!(batch.remove(0).is_ok());
    }
    assert_eq!(batch.remove(0), Err(DraftError::LastDraft));
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_batch_validation_boundaries() {
    let project = project("Internal Tools");
    let projects = [project.clone()];

    // 23h59m is the largest accepted row.
    let rows = validate_batch(
        &[draft(&project, "Long day", "23", "59")],
        &projects,
        Uuid::nil(),
        today(),
    )
    .unwrap();
    assert_eq!(rows[0].total_minutes(), 1439);

    for (hours, minutes) in [("24", "0"), ("-1", "0"), ("0", "60"), ("0", "-1")] {
        let result = validate_batch(
            &[draft(&project, "Out of range", hours, minutes)],
            &projects,
            Uuid::nil(),
            today(),
        );
        assert!(result.is_err(), "hours={hours} minutes={minutes}");
    }
}

#[test]
fn test_batch_validation_date_window() {
    let project = project("Internal Tools");
    let projects = [project.clone()];

    for (offset, accepted) in [(0i64, true), (-7, true), (-8, false), (1, false)] {
        let mut row = draft(&project, "Dated", "1", "0");
        row.date = today() + Duration::days(offset);
        let result = validate_batch(&[row], &projects, Uuid::nil(), today());
        assert_eq!(result.is_ok(), accepted, "offset={offset}");
    }
}

#[test]
fn test_validation_failure_stops_the_whole_batch() {
    let project = project("Internal Tools");
    let projects = [project.clone()];

    let good = draft(&project, "Fine", "1", "0");
    let bad = draft(&project, "", "1", "0");

    // No NewTask rows come back at all; the caller has nothing to insert,
    // so a failed batch saves nothing.
    let result = validate_batch(
        &[good, bad],
        &projects,
        Uuid::nil(),
        today(),
    );
    assert_eq!(result, Err(ValidationError::EmptyTaskName { row: 2 }));
}

#[test]
fn test_insert_payload_shape() {
    let project = project("Internal Tools");
    let projects = [project.clone()];
    let user_id = Uuid::new_v4();

    let mut row = draft(&project, "  Sprint planning  ", "2", "15");
    row.notes = "with the whole team".to_string();

    let rows: Vec<NewTask> = validate_batch(&[row], &projects, user_id, today()).unwrap();
    let json = serde_json::to_value(&rows).unwrap();

    assert_eq!(json[0]["user_id"], user_id.to_string());
    assert_eq!(json[0]["task_name"], "Sprint planning");
    assert_eq!(json[0]["date"], "2026-08-06");
    assert_eq!(json[0]["hours"], 2);
    assert_eq!(json[0]["minutes"], 15);
    assert_eq!(json[0]["notes"], "with the whole team");
    // total_minutes is derived by the store, never sent.
    assert!(json[0].get("total_minutes").is_none());
}

#[test]
fn test_dashboard_today_stat() {
    // Two tasks dated today, 1h30m and 0h45m, inside a 7-day window.
    let tasks = vec![
        task("Morning", "Tools", today(), 90),
        task("Afternoon", "Tools", today(), 45),
        task("Earlier", "Tools", today() - Duration::days(3), 60),
    ];

    let stats = DashboardStats::compute(&tasks, today());
    assert_eq!(stats.today, 2.25);
    assert_eq!(stats.total, 3);
}

#[test]
fn test_chart_series_orders_by_date_without_zero_fill() {
    // Fetch order is ascending by date; the series keeps it and skips the
    // gap on Aug 3.
    let tasks = vec![
        task("a", "Tools", d(2026, 8, 2), 60),
        task("b", "Tools", d(2026, 8, 2), 30),
        task("c", "Tools", d(2026, 8, 4), 120),
    ];

    let series = daily_series(&tasks);
    assert_eq!(series, vec![(d(2026, 8, 2), 1.5), (d(2026, 8, 4), 2.0)]);
}

#[test]
fn test_history_grouping_partitions_without_losing_minutes() {
    let mut state = HistoryState::new(None, GroupMode::Date);
    state.set_tasks(vec![
        task("Review", "Tools", d(2026, 8, 6), 90),
        task("Standup", "Ops", d(2026, 8, 6), 15),
        task("Deploy", "Tools", d(2026, 8, 5), 30),
        task("Triage", "Ops", d(2026, 8, 4), 45),
    ]);

    let total_of = |state: &HistoryState| -> i64 {
        state
            .grouped()
            .iter()
            .flat_map(|(_, tasks)| tasks.iter())
            .map(|t| t.total_minutes)
            .sum()
    };

    let by_date_groups = state.grouped().len();
    let by_date_total = total_of(&state);

    state.toggle_group_mode();
    let by_project_groups = state.grouped().len();
    let by_project_total = total_of(&state);

    assert_eq!(by_date_groups, 3);
    assert_eq!(by_project_groups, 2);
    assert_eq!(by_date_total, by_project_total);
    assert_eq!(by_date_total, 180);
}

#[test]
fn test_history_search_then_group() {
    let mut state = HistoryState::new(Some("deploy".to_string()), GroupMode::Project);
    state.set_tasks(vec![
        task("Deploy staging", "Tools", d(2026, 8, 5), 30),
        task("DEPLOY prod", "Tools", d(2026, 8, 4), 60),
        task("Standup", "Ops", d(2026, 8, 5), 15),
    ]);

    let grouped = state.grouped();
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].0, "Tools");
    assert_eq!(grouped[0].1.len(), 2);
}

#[test]
fn test_icon_resolution_is_total() {
    assert_eq!(
        ProjectGlyph::resolve(Some("plane-takeoff")),
        ProjectGlyph::PlaneTakeoff
    );
    assert_eq!(ProjectGlyph::resolve(None), ProjectGlyph::Folder);
    assert_eq!(ProjectGlyph::resolve(Some("no-such-glyph")), ProjectGlyph::Folder);
    assert_eq!(ProjectGlyph::resolve(Some("")), ProjectGlyph::Folder);
}

#[test]
fn test_trailing_window_start_dates() {
    assert_eq!(TrailingWindow::Week.start(today()), d(2026, 7, 30));
    assert_eq!(TrailingWindow::Month.start(today()), d(2026, 7, 7));
    assert_eq!(TrailingWindow::Quarter.start(today()), d(2026, 5, 8));
}

#[test]
fn test_config_toml_round_trip() {
    let config = Config {
        backend_url: "https://store.example.com".to_string(),
        api_key: "anon-key".to_string(),
        default_range_days: 7,
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

    let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.backend_url, config.backend_url);
    assert_eq!(loaded.api_key, config.api_key);
    assert_eq!(loaded.default_range_days, 7);
    assert!(loaded.validate().is_ok());
}
