//! Remote query and mutation API consumed by the board.

use crate::board::domain::{
    Comment, NewComment, NewTask, ProjectDetails, ProjectId, Task, TaskId, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Server acknowledgement of a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusConfirmation {
    /// Confirmed task.
    pub task_id: TaskId,
    /// Status as stored by the server.
    pub status: TaskStatus,
}

/// Remote sync contract.
///
/// Every mutation other than a status change is expected to be followed by
/// a revalidating [`RemoteSyncGateway::fetch_project_details`] call.
#[async_trait]
pub trait RemoteSyncGateway: Send + Sync {
    /// Fetches the project metadata and its ordered tasks with comments.
    ///
    /// Idempotent and free of server-side effects.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for an unknown project and
    /// [`GatewayError::Transport`] when the server cannot be reached.
    async fn fetch_project_details(&self, project_id: &ProjectId)
    -> GatewayResult<ProjectDetails>;

    /// Persists a task's status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RemoteRejected`] when the task no longer exists
    /// or the status is refused.
    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> GatewayResult<StatusConfirmation>;

    /// Creates a task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RemoteRejected`] when the payload is refused.
    async fn create_task(&self, request: &NewTask) -> GatewayResult<Task>;

    /// Deletes a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RemoteRejected`] when the task does not exist.
    async fn delete_task(&self, task_id: &TaskId) -> GatewayResult<TaskId>;

    /// Adds a comment to a task and returns the stored comment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RemoteRejected`] when the task does not exist
    /// or the payload is refused.
    async fn create_comment(&self, request: &NewComment) -> GatewayResult<Comment>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The server refused the request.
    #[error("request rejected by server: {0}")]
    RemoteRejected(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request could not be delivered or the response was unusable.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
