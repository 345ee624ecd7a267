use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::models::{NewTask, Project, TaskDraft};

pub const MAX_TASK_NAME_CHARS: usize = 200;
pub const MAX_NOTES_CHARS: usize = 500;
pub const MAX_ROW_MINUTES: i64 = 1440;
pub const DATE_WINDOW_DAYS: i64 = 7;

/// First validation failure found in a batch. `row` is 1-based, matching the
/// numbering shown on the form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task {row}: please select a project")]
    MissingProject { row: usize },

    #[error("Task {row}: the selected project is not active")]
    InactiveProject { row: usize },

    #[error("Task {row}: please enter a task name")]
    EmptyTaskName { row: usize },

    #[error("Task {row}: task name is too long (max 200 characters)")]
    TaskNameTooLong { row: usize },

    #[error("Task {row}: date must be within the last 7 days")]
    DateOutOfRange { row: usize },

    #[error("Task {row}: hours must be a whole number between 0 and 23")]
    InvalidHours { row: usize },

    #[error("Task {row}: minutes must be a whole number between 0 and 59")]
    InvalidMinutes { row: usize },

    #[error("Task {row}: duration cannot exceed 24 hours")]
    DurationTooLong { row: usize },

    #[error("Task {row}: notes are too long (max 500 characters)")]
    NotesTooLong { row: usize },
}

/// Inclusive submission window: `today - 7 days ..= today`. The date input
/// in the form clamps to the same bounds.
pub fn date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(DATE_WINDOW_DAYS), today)
}

pub fn date_in_window(date: NaiveDate, today: NaiveDate) -> bool {
    let (earliest, latest) = date_window(today);
    date >= earliest && date <= latest
}

/// Validate a whole batch of drafts and convert it to insert payloads.
///
/// Runs before any write is attempted; the first failing row aborts the
/// entire submission, so either every row becomes a `NewTask` or none does.
pub fn validate_batch(
    drafts: &[TaskDraft],
    active_projects: &[Project],
    user_id: Uuid,
    today: NaiveDate,
) -> Result<Vec<NewTask>, ValidationError> {
    let mut rows = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.iter().enumerate() {
        let row = index + 1;

        let project_id = draft
            .project_id
            .ok_or(ValidationError::MissingProject { row })?;
        let project = active_projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or(ValidationError::InactiveProject { row })?;
        if !project.is_active() {
            return Err(ValidationError::InactiveProject { row });
        }

        let task_name = draft.task_name.trim();
        if task_name.is_empty() {
            return Err(ValidationError::EmptyTaskName { row });
        }
        if task_name.chars().count() > MAX_TASK_NAME_CHARS {
            return Err(ValidationError::TaskNameTooLong { row });
        }

        if !date_in_window(draft.date, today) {
            return Err(ValidationError::DateOutOfRange { row });
        }

        let hours: i64 = draft
            .hours
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidHours { row })?;
        if !(0..=23).contains(&hours) {
            return Err(ValidationError::InvalidHours { row });
        }

        let minutes: i64 = draft
            .minutes
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidMinutes { row })?;
        if !(0..=59).contains(&minutes) {
            return Err(ValidationError::InvalidMinutes { row });
        }

        // Per-row cap, checked on its own and not derived from the field
        // ranges above.
        if hours * 60 + minutes > MAX_ROW_MINUTES {
            return Err(ValidationError::DurationTooLong { row });
        }

        let notes = draft.notes.trim();
        if notes.chars().count() > MAX_NOTES_CHARS {
            return Err(ValidationError::NotesTooLong { row });
        }

        rows.push(NewTask {
            user_id,
            project_id,
            task_name: task_name.to_string(),
            date: draft.date,
            hours,
            minutes,
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn active_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            project_name: "Internal Tools".to_string(),
            icon: None,
            status: ProjectStatus::Active,
        }
    }

    fn valid_draft(project: &Project) -> TaskDraft {
        let mut draft = TaskDraft::new(today());
        draft.project_id = Some(project.id);
        draft.task_name = "Code review".to_string();
        draft.hours = "1".to_string();
        draft.minutes = "30".to_string();
        draft
    }

    fn check(draft: TaskDraft, projects: &[Project]) -> Result<Vec<NewTask>, ValidationError> {
        validate_batch(&[draft], projects, Uuid::nil(), today())
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        let project = active_project();
        let rows = check(valid_draft(&project), &[project.clone()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_id, project.id);
        assert_eq!(rows[0].total_minutes(), 90);
        assert_eq!(rows[0].notes, None);
    }

    #[test]
    fn rejects_missing_or_inactive_project() {
        let project = active_project();

        let mut draft = valid_draft(&project);
        draft.project_id = None;
        assert_eq!(
            check(draft, &[project.clone()]),
            Err(ValidationError::MissingProject { row: 1 })
        );

        let mut draft = valid_draft(&project);
        draft.project_id = Some(Uuid::new_v4());
        assert_eq!(
            check(draft, &[project]),
            Err(ValidationError::InactiveProject { row: 1 })
        );
    }

    #[test]
    fn rejects_blank_task_name_after_trimming() {
        let project = active_project();
        let mut draft = valid_draft(&project);
        draft.task_name = "   ".to_string();
        assert_eq!(
            check(draft, &[project]),
            Err(ValidationError::EmptyTaskName { row: 1 })
        );
    }

    #[test]
    fn hour_and_minute_ranges() {
        let project = active_project();

        for (hours, minutes, expected) in [
            ("24", "0", Some(ValidationError::InvalidHours { row: 1 })),
            ("-1", "0", Some(ValidationError::InvalidHours { row: 1 })),
            ("0", "60", Some(ValidationError::InvalidMinutes { row: 1 })),
            ("0", "-1", Some(ValidationError::InvalidMinutes { row: 1 })),
            ("two", "0", Some(ValidationError::InvalidHours { row: 1 })),
            ("23", "59", None),
        ] {
            let mut draft = valid_draft(&project);
            draft.hours = hours.to_string();
            draft.minutes = minutes.to_string();
            let result = check(draft, &[project.clone()]);
            match expected {
                Some(err) => assert_eq!(result, Err(err), "hours={hours} minutes={minutes}"),
                None => assert!(result.is_ok(), "hours={hours} minutes={minutes}"),
            }
        }
    }

    #[test]
    fn date_window_is_inclusive_on_both_ends() {
        let project = active_project();

        for (offset, ok) in [(-7i64, true), (-8, false), (1, false), (0, true)] {
            let mut draft = valid_draft(&project);
            draft.date = today() + Duration::days(offset);
            let result = check(draft, &[project.clone()]);
            assert_eq!(result.is_ok(), ok, "offset={offset}");
        }
    }

    #[test]
    fn first_failing_row_aborts_the_whole_batch() {
        let project = active_project();
        let good = valid_draft(&project);
        let mut bad = valid_draft(&project);
        bad.task_name = String::new();

        let result = validate_batch(
            &[good, bad],
            &[project],
            Uuid::nil(),
            today(),
        );
        assert_eq!(result, Err(ValidationError::EmptyTaskName { row: 2 }));
    }

    #[test]
    fn caps_name_and_notes_length() {
        let project = active_project();

        let mut draft = valid_draft(&project);
        draft.task_name = "x".repeat(MAX_TASK_NAME_CHARS + 1);
        assert_eq!(
            check(draft, &[project.clone()]),
            Err(ValidationError::TaskNameTooLong { row: 1 })
        );

        let mut draft = valid_draft(&project);
        draft.notes = "x".repeat(MAX_NOTES_CHARS + 1);
        assert_eq!(
            check(draft, &[project]),
            Err(ValidationError::NotesTooLong { row: 1 })
        );
    }

    #[test]
    fn blank_notes_become_null() {
        let project = active_project();
        let mut draft = valid_draft(&project);
        draft.notes = "  ".to_string();
        let rows = check(draft, &[project]).unwrap();
        assert_eq!(rows[0].notes, None);
    }
}
