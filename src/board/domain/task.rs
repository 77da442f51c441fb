//! Task and comment records as held by the board.

use super::{BoardDomainError, CommentId, ProjectId, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    author_email: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment record.
    #[must_use]
    pub fn new(
        id: CommentId,
        content: impl Into<String>,
        author_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author_email: author_email.into(),
            created_at,
        }
    }

    /// Builds a comment from its wire record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyIdentifier`] when the record has no
    /// usable identifier.
    pub fn from_record(record: CommentRecord) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: CommentId::new(record.id)?,
            content: record.content,
            author_email: record.author_email,
            created_at: record.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the author's email address.
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A task card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    assignee_email: Option<String>,
    created_at: DateTime<Utc>,
    comments: Vec<Comment>,
}

impl Task {
    /// Creates a task with no description, assignee or comments.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        status: TaskStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status,
            assignee_email: None,
            created_at,
            comments: Vec::new(),
        }
    }

    /// Sets the task description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the assignee email. Blank text leaves the task unassigned.
    #[must_use]
    pub fn with_assignee(mut self, assignee_email: impl Into<String>) -> Self {
        self.assignee_email = non_blank(assignee_email.into());
        self
    }

    /// Sets the ordered comment list.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments = comments.into_iter().collect();
        self
    }

    /// Builds a task from its wire record.
    ///
    /// Unknown status values are bucketed into `fallback`; comments without
    /// an identifier are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyIdentifier`] when the record has no
    /// usable task identifier.
    pub fn from_record(record: TaskRecord, fallback: TaskStatus) -> Result<Self, BoardDomainError> {
        let id = TaskId::new(record.id)?;
        let status = TaskStatus::normalize(&record.status, fallback);
        let comments = record
            .comments
            .into_iter()
            .filter_map(|comment| match Comment::from_record(comment) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    tracing::warn!(task_id = %id, error = %err, "skipping malformed comment");
                    None
                }
            })
            .collect::<Vec<_>>();

        Ok(Self::new(
            id,
            record.title,
            status,
            record.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
        .with_description(record.description.unwrap_or_default())
        .with_assignee(record.assignee_email.unwrap_or_default())
        .with_comments(comments))
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee email, if any.
    #[must_use]
    pub fn assignee_email(&self) -> Option<&str> {
        self.assignee_email.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the comments in display order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Replaces the status. Returns `true` when the value changed.
    pub fn set_status(&mut self, status: TaskStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }

    /// Appends a comment, or replaces the comment with the same identifier.
    pub fn upsert_comment(&mut self, comment: Comment) {
        match self
            .comments
            .iter_mut()
            .find(|existing| existing.id == comment.id)
        {
            Some(existing) => *existing = comment,
            None => self.comments.push(comment),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Comment as returned by the project-details query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    /// Server identifier.
    #[serde(default)]
    pub id: String,
    /// Comment body.
    #[serde(default)]
    pub content: String,
    /// Author email.
    #[serde(default)]
    pub author_email: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Task as returned by the project-details query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Server identifier.
    #[serde(default)]
    pub id: String,
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw status string.
    #[serde(default)]
    pub status: String,
    /// Optional assignee email.
    #[serde(default)]
    pub assignee_email: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Nested comments.
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    assignee_email: Option<String>,
}

impl NewTask {
    /// Creates a request with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            project_id,
            title: trimmed.to_owned(),
            description: None,
            assignee_email: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the assignee. Blank text leaves the task unassigned.
    #[must_use]
    pub fn with_assignee(mut self, assignee_email: impl Into<String>) -> Self {
        self.assignee_email = non_blank(assignee_email.into());
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee email, if any.
    #[must_use]
    pub fn assignee_email(&self) -> Option<&str> {
        self.assignee_email.as_deref()
    }
}

/// Request payload for commenting on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    task_id: TaskId,
    content: String,
    author_email: String,
}

impl NewComment {
    /// Creates a comment request.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyComment`] for blank content and
    /// [`BoardDomainError::EmptyAuthor`] for a blank author.
    pub fn new(
        task_id: TaskId,
        content: impl Into<String>,
        author_email: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        let content_text = content.into();
        if content_text.trim().is_empty() {
            return Err(BoardDomainError::EmptyComment);
        }
        let author = author_email.into();
        if author.trim().is_empty() {
            return Err(BoardDomainError::EmptyAuthor);
        }
        Ok(Self {
            task_id,
            content: content_text,
            author_email: author,
        })
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the author's email address.
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }
}
