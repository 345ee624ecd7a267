use chrono::NaiveDate;
use uuid::Uuid;

/// Hard cap on rows in a single batch submission.
pub const MAX_DRAFTS: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("You can add a maximum of 20 tasks at once")]
    LimitReached,

    #[error("At least one task is required")]
    LastDraft,
}

/// An unsaved time entry held in the form. Duration fields stay raw text
/// until validation parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub task_name: String,
    pub date: NaiveDate,
    pub hours: String,
    pub minutes: String,
    pub notes: String,
}

impl TaskDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: None,
            task_name: String::new(),
            date: today,
            hours: "0".to_string(),
            minutes: "0".to_string(),
            notes: String::new(),
        }
    }
}

/// Ordered sequence of drafts pending batch submission. Always holds between
/// one and [`MAX_DRAFTS`] rows.
#[derive(Debug, Clone)]
pub struct DraftBatch {
    drafts: Vec<TaskDraft>,
}

impl DraftBatch {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            drafts: vec![TaskDraft::new(today)],
        }
    }

    pub fn drafts(&self) -> &[TaskDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TaskDraft> {
        self.drafts.get_mut(index)
    }

    /// Append a fresh draft. Rejected without state change once the batch
    /// holds [`MAX_DRAFTS`] rows.
    pub fn add(&mut self, today: NaiveDate) -> Result<(), DraftError> {
        if self.drafts.len() >= MAX_DRAFTS {
            return Err(DraftError::LimitReached);
        }
        self.drafts.push(TaskDraft::new(today));
        Ok(())
    }

    /// Remove the draft at `index`. Rejected when it is the last row left.
    pub fn remove(&mut self, index: usize) -> Result<(), DraftError> {
        if self.drafts.len() == 1 {
            return Err(DraftError::LastDraft);
        }
        if index < self.drafts.len() {
            self.drafts.remove(index);
        }
        Ok(())
    }

    /// Back to a single empty draft, as after a successful submission.
    pub fn reset(&mut self, today: NaiveDate) {
        self.drafts = vec![TaskDraft::new(today)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn starts_with_one_defaulted_draft() {
        let batch = DraftBatch::new(today());
        assert_eq!(batch.len(), 1);

        let draft = &batch.drafts()[0];
        assert_eq!(draft.date, today());
        assert_eq!(draft.hours, "0");
        assert_eq!(draft.minutes, "0");
        assert_eq!(draft.project_id, None);
        assert!(draft.task_name.is_empty());
    }

    #[test]
    fn add_succeeds_up_to_the_cap_then_rejects() {
        let mut batch = DraftBatch::new(today());
        for expected in 2..=MAX_DRAFTS {
            batch.add(today()).unwrap();
            assert_eq!(batch.len(), expected);
        }

        assert_eq!(batch.add(today()), Err(DraftError::LimitReached));
        assert_eq!(batch.len(), MAX_DRAFTS);
    }

    #[test]
    fn remove_rejects_the_last_remaining_draft() {
        let mut batch = DraftBatch::new(today());
        assert_eq!(batch.remove(0), Err(DraftError::LastDraft));
        assert_eq!(batch.len(), 1);

        batch.add(today()).unwrap();
        batch.remove(0).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn reset_returns_to_a_single_empty_draft() {
        let mut batch = DraftBatch::new(today());
        batch.add(today()).unwrap();
        batch.get_mut(0).unwrap().task_name = "Code review".to_string();

        batch.reset(today());
        assert_eq!(batch.len(), 1);
        assert!(batch.drafts()[0].task_name.is_empty());
    }
}
