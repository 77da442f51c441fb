//! Project metadata and the project-details snapshot.

use super::{BoardDomainError, ProjectId, ProjectStatus, Task, TaskRecord, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project metadata shown above the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    id: ProjectId,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    due_date: Option<NaiveDate>,
}

impl ProjectSummary {
    /// Creates an active project with no description or due date.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            status: ProjectStatus::Active,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Sets the project status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}

/// Authoritative snapshot returned by the project-details fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetails {
    summary: ProjectSummary,
    tasks: Vec<Task>,
}

impl ProjectDetails {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(summary: ProjectSummary, tasks: Vec<Task>) -> Self {
        Self { summary, tasks }
    }

    /// Builds a snapshot from the project-details wire record.
    ///
    /// Tasks without an identifier are skipped; unknown task statuses are
    /// bucketed into `fallback`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyIdentifier`] when the project has no
    /// usable identifier.
    pub fn from_record(
        record: ProjectRecord,
        fallback: TaskStatus,
    ) -> Result<Self, BoardDomainError> {
        let mut summary = ProjectSummary::new(ProjectId::new(record.id)?, record.name)
            .with_description(record.description.unwrap_or_default())
            .with_status(ProjectStatus::normalize(
                record.status.as_deref().unwrap_or_default(),
            ));
        if let Some(due_date) = record.due_date {
            summary = summary.with_due_date(due_date);
        }

        let tasks = record
            .tasks
            .into_iter()
            .filter_map(|task| match Task::from_record(task, fallback) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    tracing::warn!(project_id = %summary.id(), error = %err, "skipping malformed task");
                    None
                }
            })
            .collect();

        Ok(Self::new(summary, tasks))
    }

    /// Returns the project metadata.
    #[must_use]
    pub const fn summary(&self) -> &ProjectSummary {
        &self.summary
    }

    /// Returns the tasks in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the snapshot.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of tasks in the `Done` column.
    #[must_use]
    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Done)
            .count()
    }

    /// Splits the snapshot into metadata and tasks.
    #[must_use]
    pub fn into_parts(self) -> (ProjectSummary, Vec<Task>) {
        (self.summary, self.tasks)
    }
}

/// Project as returned by the project-details query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Server identifier.
    #[serde(default)]
    pub id: String,
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw project status.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Tasks in server order.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}
