use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::api::auth::AuthSession;
use crate::api::error::{error_from_response, ApiError};
use crate::models::{Config, NewTask, Project, Task};

/// Sort direction for task fetches. The dashboard reads oldest-first for the
/// chart; history reads newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

impl DateOrder {
    fn query_value(self) -> &'static str {
        match self {
            DateOrder::Ascending => "date.asc",
            DateOrder::Descending => "date.desc",
        }
    }
}

/// Client for the hosted relational store's REST surface. Every read and
/// write this application performs goes through here; there is no local
/// persistence.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(config: &Config, session: &AuthSession) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: session.access_token.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    /// Projects currently offered as targets for new tasks, ordered by name.
    pub async fn active_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self
            .authed(self.http.get(self.table_url("projects")))
            .query(&[
                ("select", "id,project_name,icon,status"),
                ("status", "eq.active"),
                ("order", "project_name.asc"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let projects: Vec<Project> = response.json().await?;
        debug!("fetched {} active projects", projects.len());
        Ok(projects)
    }

    /// The user's tasks with their owning project embedded, optionally
    /// bounded below by `date >= since`.
    pub async fn tasks(
        &self,
        user_id: Uuid,
        since: Option<NaiveDate>,
        order: DateOrder,
    ) -> Result<Vec<Task>, ApiError> {
        let mut request = self
            .authed(self.http.get(self.table_url("tasks")))
            .query(&[
                ("select", "*,projects(project_name,icon)".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", order.query_value().to_string()),
            ]);

        if let Some(since) = since {
            request = request.query(&[("date", format!("gte.{}", since))]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let tasks: Vec<Task> = response.json().await?;
        debug!("fetched {} tasks (since {:?})", tasks.len(), since);
        Ok(tasks)
    }

    /// Insert a batch of task rows in one call. The store applies the batch
    /// as a single statement, so it lands all-or-nothing.
    pub async fn insert_tasks(&self, rows: &[NewTask]) -> Result<(), ApiError> {
        let response = self
            .authed(self.http.post(self.table_url("tasks")))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!("inserted {} tasks", rows.len());
        Ok(())
    }

    /// Permanently delete a single task.
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .authed(self.http.delete(self.table_url("tasks")))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!("deleted task {}", id);
        Ok(())
    }
}
