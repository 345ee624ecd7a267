use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Inactive => write!(f, "inactive"),
            ProjectStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A project as served by the backend. The store owns these; this layer only
/// reads them and references their ids from new tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub status: ProjectStatus,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_row() {
        let row = r#"{
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "project_name": "Internal Tools",
            "icon": "plane-takeoff",
            "status": "active"
        }"#;

        let project: Project = serde_json::from_str(row).unwrap();
        assert_eq!(project.project_name, "Internal Tools");
        assert_eq!(project.icon.as_deref(), Some("plane-takeoff"));
        assert!(project.is_active());
    }

    #[test]
    fn missing_icon_and_unknown_status_are_tolerated() {
        let row = r#"{
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "project_name": "Archive",
            "status": "paused"
        }"#;

        let project: Project = serde_json::from_str(row).unwrap();
        assert_eq!(project.icon, None);
        assert_eq!(project.status, ProjectStatus::Unknown);
        assert!(!project.is_active());
    }
}
