//! Event-driven board state for one project view.

use super::coordinator::{Resolution, StatusTransitionCoordinator};
use crate::board::domain::{
    BoardCommand, BoardConfig, BoardEvent, Columns, Comment, DragSession, DropOutcome,
    MutationKind, NewComment, NewTask, Notice, NoticeKind, NoticeQueue, ProjectDetails,
    ProjectId, ProjectRecord, ProjectSummary, RequestTicket, Task, TaskId, TaskStatus, TaskStore,
    project_columns, resolve_drop_target,
};

/// Loading status of the board's project snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No project is open.
    #[default]
    Idle,
    /// The first snapshot for the open project is being fetched.
    Loading,
    /// A snapshot has been applied.
    Ready,
    /// The most recent fetch failed; the view should offer a retry.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Board view state: the task store plus the drag session, transition
/// coordinator and fetch bookkeeping that keep it consistent.
///
/// All state changes happen synchronously in [`TaskBoard::handle`] and the
/// other entry points. Remote work is requested by returning
/// [`BoardCommand`]s; their outcomes come back as [`BoardEvent`]s.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    config: BoardConfig,
    project_id: Option<ProjectId>,
    summary: Option<ProjectSummary>,
    epoch: u64,
    next_seq: u64,
    store: TaskStore,
    drag: DragSession,
    coordinator: StatusTransitionCoordinator,
    load_state: LoadState,
    applied_snapshot: Option<RequestTicket>,
    notices: NoticeQueue,
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl TaskBoard {
    /// Creates a board with no open project.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let notices = NoticeQueue::with_capacity(config.notice_capacity);
        let coordinator = StatusTransitionCoordinator::new(0, config.rollback_on_rejection);
        Self {
            config,
            project_id: None,
            summary: None,
            epoch: 0,
            next_seq: 0,
            store: TaskStore::new(),
            drag: DragSession::new(),
            coordinator,
            load_state: LoadState::Idle,
            applied_snapshot: None,
            notices,
        }
    }

    /// Switches the board to a project and requests its snapshot.
    ///
    /// Everything tied to the previous project is discarded, and resolutions
    /// of requests issued for it will be ignored.
    pub fn open_project(&mut self, project_id: ProjectId) -> Vec<BoardCommand> {
        self.reset_context();
        tracing::debug!(project_id = %project_id, epoch = self.epoch, "opening project");
        self.project_id = Some(project_id);
        self.load_state = LoadState::Loading;
        self.fetch().into_iter().collect()
    }

    /// Tears the board down, as on unmount.
    pub fn close(&mut self) {
        self.reset_context();
    }

    /// Requests a background revalidation of the open project.
    pub fn refresh(&mut self) -> Vec<BoardCommand> {
        self.fetch().into_iter().collect()
    }

    /// Re-requests the snapshot after a failed fetch.
    pub fn retry(&mut self) -> Vec<BoardCommand> {
        if matches!(self.load_state, LoadState::Failed { .. }) {
            self.load_state = LoadState::Loading;
        }
        self.refresh()
    }

    /// Records the start of a drag gesture. Returns `true` when captured.
    pub fn on_drag_start(&mut self, task_id: TaskId) -> bool {
        if !self.store.contains(&task_id) {
            tracing::debug!(task_id = %task_id, "ignoring drag start for unknown task");
            return false;
        }
        self.drag.start(task_id)
    }

    /// Records the end of a drag gesture over `target`, if any.
    pub fn on_drag_end(&mut self, task_id: &TaskId, target: Option<&str>) -> Vec<BoardCommand> {
        let outcome = self
            .drag
            .finish(task_id, resolve_drop_target(target), &self.store);
        match outcome {
            DropOutcome::Transition { task_id: moved, status } => {
                self.begin_transition(moved, status).into_iter().collect()
            }
            other => {
                tracing::debug!(task_id = %task_id, outcome = ?other, "drop without status change");
                Vec::new()
            }
        }
    }

    /// Abandons the current drag gesture.
    pub fn on_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Requests creation of a task in the open project.
    pub fn create_task(&mut self, request: NewTask) -> Vec<BoardCommand> {
        if self.project_id.as_ref() != Some(request.project_id()) {
            tracing::warn!(project_id = %request.project_id(), "create task for a project that is not open");
            return Vec::new();
        }
        let ticket = self.next_ticket();
        vec![BoardCommand::CreateTask { ticket, request }]
    }

    /// Requests deletion of a task.
    pub fn delete_task(&mut self, task_id: TaskId) -> Vec<BoardCommand> {
        if self.project_id.is_none() {
            return Vec::new();
        }
        let ticket = self.next_ticket();
        vec![BoardCommand::DeleteTask { ticket, task_id }]
    }

    /// Requests a new comment on a task.
    pub fn create_comment(&mut self, request: NewComment) -> Vec<BoardCommand> {
        if self.project_id.is_none() {
            return Vec::new();
        }
        let ticket = self.next_ticket();
        vec![BoardCommand::CreateComment { ticket, request }]
    }

    /// Applies one event and returns the remote requests it causes.
    pub fn handle(&mut self, event: BoardEvent) -> Vec<BoardCommand> {
        match event {
            BoardEvent::DragStarted { task_id } => {
                self.on_drag_start(task_id);
                Vec::new()
            }
            BoardEvent::DragEnded { task_id, target } => {
                self.on_drag_end(&task_id, target.as_deref())
            }
            BoardEvent::DragCancelled => {
                self.on_drag_cancel();
                Vec::new()
            }
            BoardEvent::TransitionConfirmed {
                ticket,
                task_id,
                status,
            } => {
                self.on_transition_confirmed(ticket, &task_id, status);
                Vec::new()
            }
            BoardEvent::TransitionRejected {
                ticket,
                task_id,
                reason,
            } => {
                self.on_transition_rejected(ticket, &task_id, &reason);
                Vec::new()
            }
            BoardEvent::SnapshotLoaded { ticket, snapshot } => {
                self.on_snapshot_loaded(ticket, snapshot);
                Vec::new()
            }
            BoardEvent::RecordLoaded { ticket, record } => {
                self.on_record_loaded(ticket, record);
                Vec::new()
            }
            BoardEvent::SnapshotFailed { ticket, reason } => {
                self.on_snapshot_failed(ticket, reason);
                Vec::new()
            }
            BoardEvent::TaskCreated { ticket, task } => self.on_task_created(ticket, task),
            BoardEvent::TaskDeleted { ticket, task_id } => self.on_task_deleted(ticket, &task_id),
            BoardEvent::CommentCreated {
                ticket,
                task_id,
                comment,
            } => self.on_comment_created(ticket, &task_id, comment),
            BoardEvent::MutationRejected {
                ticket,
                kind,
                reason,
            } => {
                self.on_mutation_rejected(ticket, kind, &reason);
                Vec::new()
            }
        }
    }

    /// Returns the tasks grouped into columns.
    #[must_use]
    pub fn columns(&self) -> Columns<'_> {
        project_columns(self.store.tasks())
    }

    /// Returns `true` when the task is the current drag subject.
    #[must_use]
    pub fn is_dragging(&self, task_id: &TaskId) -> bool {
        self.drag.is_dragging(task_id)
    }

    /// Returns the task currently being dragged.
    #[must_use]
    pub fn drag_subject(&self) -> Option<&Task> {
        self.drag
            .subject()
            .and_then(|task_id| self.store.get(task_id))
    }

    /// Returns `true` while a status change for the task is unconfirmed.
    #[must_use]
    pub fn is_pending(&self, task_id: &TaskId) -> bool {
        self.coordinator.is_pending(task_id)
    }

    /// Returns the snapshot loading status.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Returns the open project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the metadata of the last applied snapshot.
    #[must_use]
    pub const fn project(&self) -> Option<&ProjectSummary> {
        self.summary.as_ref()
    }

    /// Returns the task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the number of tasks in the `Done` column.
    #[must_use]
    pub fn completed_task_count(&self) -> usize {
        self.columns().get(TaskStatus::Done).len()
    }

    /// Iterates queued notices, oldest first.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Removes and returns every queued notice.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn reset_context(&mut self) {
        self.epoch += 1;
        self.project_id = None;
        self.summary = None;
        self.store.clear();
        self.drag.cancel();
        self.coordinator.reset(self.epoch);
        self.load_state = LoadState::Idle;
        self.applied_snapshot = None;
        self.notices.clear();
    }

    fn next_ticket(&mut self) -> RequestTicket {
        self.next_seq += 1;
        RequestTicket {
            epoch: self.epoch,
            seq: self.next_seq,
        }
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        let current = self.project_id.is_some() && ticket.epoch == self.epoch;
        if !current {
            tracing::debug!(%ticket, epoch = self.epoch, "discarding resolution from another project context");
        }
        current
    }

    fn fetch(&mut self) -> Option<BoardCommand> {
        let project_id = self.project_id.clone()?;
        let ticket = self.next_ticket();
        Some(BoardCommand::FetchProject { ticket, project_id })
    }

    fn begin_transition(&mut self, task_id: TaskId, status: TaskStatus) -> Option<BoardCommand> {
        let ticket = self.next_ticket();
        self.coordinator
            .begin(&mut self.store, ticket, task_id, status)
            .map(BoardCommand::UpdateStatus)
    }

    fn on_transition_confirmed(&mut self, ticket: RequestTicket, task_id: &TaskId, status: TaskStatus) {
        if self.is_current(ticket) {
            self.coordinator
                .confirm(&mut self.store, ticket, task_id, status);
        }
    }

    fn on_transition_rejected(&mut self, ticket: RequestTicket, task_id: &TaskId, reason: &str) {
        if !self.is_current(ticket) {
            return;
        }
        let resolution = self.coordinator.reject(&mut self.store, ticket, task_id);
        if resolution.is_surfaced_failure() {
            let title = self
                .store
                .get(task_id)
                .map_or_else(|| task_id.to_string(), |task| task.title().to_owned());
            tracing::warn!(task_id = %task_id, %ticket, reason, ?resolution, "status change rejected");
            self.notices.push(Notice::new(
                NoticeKind::TransitionRejected,
                format!("Could not move \"{title}\": {reason}"),
            ));
        } else if resolution == Resolution::Stale {
            tracing::debug!(task_id = %task_id, %ticket, "rejection for a request no longer tracked");
        }
    }

    fn on_snapshot_loaded(&mut self, ticket: RequestTicket, snapshot: ProjectDetails) {
        if !self.is_current(ticket) || self.is_superseded_fetch(ticket) {
            return;
        }
        if self.project_id.as_ref() != Some(snapshot.summary().id()) {
            tracing::debug!(project_id = %snapshot.summary().id(), "discarding snapshot for another project");
            return;
        }
        let (summary, tasks) = snapshot.into_parts();
        self.store.load(tasks);
        self.coordinator.reconcile_snapshot(&self.store);
        self.summary = Some(summary);
        self.load_state = LoadState::Ready;
        self.applied_snapshot = Some(ticket);
        tracing::debug!(%ticket, tasks = self.store.len(), "snapshot applied");
    }

    fn on_record_loaded(&mut self, ticket: RequestTicket, record: ProjectRecord) {
        match ProjectDetails::from_record(record, self.config.unknown_status_column) {
            Ok(snapshot) => self.on_snapshot_loaded(ticket, snapshot),
            Err(err) => self.on_snapshot_failed(ticket, err.to_string()),
        }
    }

    fn on_snapshot_failed(&mut self, ticket: RequestTicket, reason: String) {
        if !self.is_current(ticket) || self.is_superseded_fetch(ticket) {
            return;
        }
        tracing::warn!(%ticket, reason = %reason, "project fetch failed");
        self.notices.push(Notice::new(
            NoticeKind::FetchFailed,
            format!("Could not load project: {reason}"),
        ));
        self.load_state = LoadState::Failed { message: reason };
    }

    fn on_task_created(&mut self, ticket: RequestTicket, task: Task) -> Vec<BoardCommand> {
        if !self.is_current(ticket) {
            return Vec::new();
        }
        self.store.insert(task);
        self.refresh()
    }

    fn on_task_deleted(&mut self, ticket: RequestTicket, task_id: &TaskId) -> Vec<BoardCommand> {
        if !self.is_current(ticket) {
            return Vec::new();
        }
        self.store.remove(task_id);
        self.coordinator.forget(task_id);
        if self.drag.is_dragging(task_id) {
            self.drag.cancel();
        }
        self.refresh()
    }

    fn on_comment_created(
        &mut self,
        ticket: RequestTicket,
        task_id: &TaskId,
        comment: Comment,
    ) -> Vec<BoardCommand> {
        if !self.is_current(ticket) {
            return Vec::new();
        }
        self.store.upsert_comment(task_id, comment);
        self.refresh()
    }

    fn on_mutation_rejected(&mut self, ticket: RequestTicket, kind: MutationKind, reason: &str) {
        if !self.is_current(ticket) {
            return;
        }
        tracing::warn!(%ticket, action = kind.describe(), reason, "mutation rejected");
        self.notices.push(Notice::new(
            NoticeKind::MutationRejected,
            format!("Could not {}: {reason}", kind.describe()),
        ));
    }

    fn is_superseded_fetch(&self, ticket: RequestTicket) -> bool {
        let superseded = self
            .applied_snapshot
            .is_some_and(|applied| ticket < applied);
        if superseded {
            tracing::debug!(%ticket, "discarding fetch resolution older than the applied snapshot");
        }
        superseded
    }
}
