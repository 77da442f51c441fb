//! In-memory implementation of the remote sync gateway.
//!
//! Behaves like the remote server: assigns identifiers and timestamps,
//! rejects requests for unknown tasks, and can be switched offline or told
//! to refuse status changes for specific tasks.

use crate::board::{
    domain::{
        Comment, CommentId, NewComment, NewTask, ProjectDetails, ProjectId, ProjectSummary, Task,
        TaskId, TaskStatus,
    },
    ports::{GatewayError, GatewayResult, RemoteSyncGateway, StatusConfirmation},
};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory [`RemoteSyncGateway`].
///
/// Thread-safe via internal [`RwLock`]; clones share the same state.
#[derive(Debug, Clone)]
pub struct InMemoryRemoteGateway<C: Clock + Send + Sync> {
    state: Arc<RwLock<GatewayState>>,
    clock: C,
}

#[derive(Debug, Default)]
struct GatewayState {
    projects: HashMap<ProjectId, ProjectEntry>,
    task_index: HashMap<TaskId, ProjectId>,
    refused_tasks: HashSet<TaskId>,
    offline: bool,
    status_updates: usize,
}

#[derive(Debug)]
struct ProjectEntry {
    summary: ProjectSummary,
    tasks: Vec<Task>,
}

impl GatewayState {
    fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        let project_id = self.task_index.get(task_id)?;
        self.projects
            .get_mut(project_id)?
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
    }

    fn ensure_online(&self) -> GatewayResult<()> {
        if self.offline {
            return Err(GatewayError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "remote gateway is offline",
            )));
        }
        Ok(())
    }
}

impl<C: Clock + Send + Sync> InMemoryRemoteGateway<C> {
    /// Creates an empty gateway with the given clock.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(GatewayState::default())),
            clock,
        }
    }

    /// Stores a project and its tasks, replacing any previous copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the state lock is poisoned.
    pub fn seed(&self, details: ProjectDetails) -> GatewayResult<()> {
        let mut state = self.write()?;
        let (summary, tasks) = details.into_parts();
        let project_id = summary.id().clone();
        if let Some(previous) = state.projects.remove(&project_id) {
            for task in &previous.tasks {
                state.task_index.remove(task.id());
            }
        }
        for task in &tasks {
            state
                .task_index
                .insert(task.id().clone(), project_id.clone());
        }
        state
            .projects
            .insert(project_id, ProjectEntry { summary, tasks });
        Ok(())
    }

    /// Switches transport failures on or off.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the state lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> GatewayResult<()> {
        self.write()?.offline = offline;
        Ok(())
    }

    /// Makes status changes for the task fail with a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the state lock is poisoned.
    pub fn refuse_status_updates_for(&self, task_id: TaskId) -> GatewayResult<()> {
        self.write()?.refused_tasks.insert(task_id);
        Ok(())
    }

    /// Changes a task's status server-side, as another client would.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for an unknown task.
    pub fn set_task_status(&self, task_id: &TaskId, status: TaskStatus) -> GatewayResult<()> {
        let mut state = self.write()?;
        let task = state
            .task_mut(task_id)
            .ok_or_else(|| GatewayError::NotFound(format!("task {task_id}")))?;
        task.set_status(status);
        Ok(())
    }

    /// Returns the server-side status of a task.
    #[must_use]
    pub fn task_status(&self, task_id: &TaskId) -> Option<TaskStatus> {
        let state = self.read().ok()?;
        let project_id = state.task_index.get(task_id)?;
        state
            .projects
            .get(project_id)?
            .tasks
            .iter()
            .find(|task| task.id() == task_id)
            .map(Task::status)
    }

    /// Returns how many status updates were received.
    #[must_use]
    pub fn status_update_count(&self) -> usize {
        self.read().map(|state| state.status_updates).unwrap_or(0)
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, GatewayState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, GatewayState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

fn minted_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl<C: Clock + Send + Sync> RemoteSyncGateway for InMemoryRemoteGateway<C> {
    async fn fetch_project_details(
        &self,
        project_id: &ProjectId,
    ) -> GatewayResult<ProjectDetails> {
        let state = self.read()?;
        state.ensure_online()?;
        let entry = state
            .projects
            .get(project_id)
            .ok_or_else(|| GatewayError::NotFound(format!("project {project_id}")))?;
        Ok(ProjectDetails::new(
            entry.summary.clone(),
            entry.tasks.clone(),
        ))
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> GatewayResult<StatusConfirmation> {
        let mut state = self.write()?;
        state.ensure_online()?;
        state.status_updates += 1;
        if state.refused_tasks.contains(task_id) {
            return Err(GatewayError::RemoteRejected(format!(
                "status change refused for task {task_id}"
            )));
        }
        let task = state
            .task_mut(task_id)
            .ok_or_else(|| GatewayError::RemoteRejected(format!("task {task_id} does not exist")))?;
        task.set_status(status);
        Ok(StatusConfirmation {
            task_id: task_id.clone(),
            status: task.status(),
        })
    }

    async fn create_task(&self, request: &NewTask) -> GatewayResult<Task> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let task_id =
            TaskId::new(minted_id()).map_err(|err| GatewayError::RemoteRejected(err.to_string()))?;
        let mut task = Task::new(
            task_id.clone(),
            request.title(),
            TaskStatus::Todo,
            self.clock.utc(),
        );
        if let Some(description) = request.description() {
            task = task.with_description(description);
        }
        if let Some(assignee) = request.assignee_email() {
            task = task.with_assignee(assignee);
        }

        let project_id = request.project_id().clone();
        let entry = state.projects.get_mut(&project_id).ok_or_else(|| {
            GatewayError::RemoteRejected(format!("project {project_id} does not exist"))
        })?;
        entry.tasks.push(task.clone());
        state.task_index.insert(task_id, project_id);
        Ok(task)
    }

    async fn delete_task(&self, task_id: &TaskId) -> GatewayResult<TaskId> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let project_id = state
            .task_index
            .remove(task_id)
            .ok_or_else(|| GatewayError::RemoteRejected(format!("task {task_id} does not exist")))?;
        if let Some(entry) = state.projects.get_mut(&project_id) {
            entry.tasks.retain(|task| task.id() != task_id);
        }
        Ok(task_id.clone())
    }

    async fn create_comment(&self, request: &NewComment) -> GatewayResult<Comment> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let comment_id = CommentId::new(minted_id())
            .map_err(|err| GatewayError::RemoteRejected(err.to_string()))?;
        let comment = Comment::new(
            comment_id,
            request.content(),
            request.author_email(),
            self.clock.utc(),
        );
        let task_id = request.task_id();
        let task = state
            .task_mut(task_id)
            .ok_or_else(|| GatewayError::RemoteRejected(format!("task {task_id} does not exist")))?;
        task.upsert_comment(comment.clone());
        Ok(comment)
    }
}
