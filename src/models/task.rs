use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of the owning project embedded in task query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProjectRef {
    pub project_name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A persisted time entry. Fetched read-only; the only mutation this layer
/// performs afterwards is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub task_name: String,
    pub date: NaiveDate,
    pub hours: i64,
    pub minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    pub total_minutes: i64,
    #[serde(rename = "projects")]
    pub project: TaskProjectRef,
}

impl Task {
    pub fn project_name(&self) -> &str {
        &self.project.project_name
    }
}

/// Insert payload for one task row. `total_minutes` is derived by the store
/// and therefore not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub task_name: String,
    pub date: NaiveDate,
    pub hours: i64,
    pub minutes: i64,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_task_with_embedded_project() {
        let row = r#"{
            "id": "0a0a0a0a-0000-4000-8000-000000000001",
            "user_id": "0a0a0a0a-0000-4000-8000-000000000002",
            "project_id": "0a0a0a0a-0000-4000-8000-000000000003",
            "task_name": "Sprint review",
            "date": "2026-08-03",
            "hours": 1,
            "minutes": 30,
            "notes": null,
            "total_minutes": 90,
            "projects": { "project_name": "Internal Tools", "icon": null }
        }"#;

        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.task_name, "Sprint review");
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(task.total_minutes, 90);
        assert_eq!(task.project_name(), "Internal Tools");
    }

    #[test]
    fn new_task_serializes_date_as_calendar_day() {
        let row = NewTask {
            user_id: Uuid::nil(),
            project_id: Uuid::nil(),
            task_name: "Standup".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
            hours: 0,
            minutes: 15,
            notes: None,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "2026-08-04");
        assert_eq!(json["notes"], serde_json::Value::Null);
        assert_eq!(row.total_minutes(), 15);
    }
}
