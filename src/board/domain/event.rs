//! Explicit events consumed by the board and commands it emits.
//!
//! UI gestures and remote resolutions are both modelled as [`BoardEvent`]s
//! applied in arrival order. Requests the board wants sent to the server
//! are returned as [`BoardCommand`]s, each tagged with a [`RequestTicket`]
//! so its eventual resolution can be matched against the current context.

use super::{
    Comment, NewComment, NewTask, ProjectDetails, ProjectId, ProjectRecord, Task, TaskId,
    TaskStatus,
};
use std::fmt;

/// Identifies one remote request issued by a board.
///
/// `epoch` changes every time a project is opened; `seq` increases with
/// every request issued within the board's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket {
    /// Project context the request belongs to.
    pub epoch: u64,
    /// Issuance order.
    pub seq: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.epoch, self.seq)
    }
}

/// Remote status update the board wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Ticket used to match the resolution.
    pub ticket: RequestTicket,
    /// Task being moved.
    pub task_id: TaskId,
    /// Requested column.
    pub status: TaskStatus,
}

/// Mutation other than a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Task creation.
    CreateTask,
    /// Task deletion.
    DeleteTask,
    /// Comment creation.
    CreateComment,
}

impl MutationKind {
    /// Returns a short verb phrase for notices.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::CreateTask => "create task",
            Self::DeleteTask => "delete task",
            Self::CreateComment => "add comment",
        }
    }
}

/// Remote request emitted by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Fetch the project-details snapshot.
    FetchProject {
        /// Request ticket.
        ticket: RequestTicket,
        /// Project to fetch.
        project_id: ProjectId,
    },
    /// Persist a status change.
    UpdateStatus(TransitionRequest),
    /// Create a task.
    CreateTask {
        /// Request ticket.
        ticket: RequestTicket,
        /// Creation payload.
        request: NewTask,
    },
    /// Delete a task.
    DeleteTask {
        /// Request ticket.
        ticket: RequestTicket,
        /// Task to delete.
        task_id: TaskId,
    },
    /// Add a comment to a task.
    CreateComment {
        /// Request ticket.
        ticket: RequestTicket,
        /// Comment payload.
        request: NewComment,
    },
}

impl BoardCommand {
    /// Returns the command's request ticket.
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::FetchProject { ticket, .. }
            | Self::CreateTask { ticket, .. }
            | Self::DeleteTask { ticket, .. }
            | Self::CreateComment { ticket, .. } => *ticket,
            Self::UpdateStatus(request) => request.ticket,
        }
    }
}

/// Input consumed by the board in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A drag gesture started on a card.
    DragStarted {
        /// Dragged task.
        task_id: TaskId,
    },
    /// A drag gesture ended.
    DragEnded {
        /// Dragged task.
        task_id: TaskId,
        /// Identifier of the element under the pointer, if any.
        target: Option<String>,
    },
    /// A drag gesture was abandoned.
    DragCancelled,
    /// The server accepted a status change.
    TransitionConfirmed {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Confirmed task.
        task_id: TaskId,
        /// Status as stored by the server.
        status: TaskStatus,
    },
    /// The server rejected a status change or it could not be delivered.
    TransitionRejected {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Rejected task.
        task_id: TaskId,
        /// Failure description.
        reason: String,
    },
    /// A project-details fetch resolved.
    SnapshotLoaded {
        /// Ticket of the originating fetch.
        ticket: RequestTicket,
        /// Fresh snapshot.
        snapshot: ProjectDetails,
    },
    /// A project-details fetch resolved with the raw wire record, which
    /// the board normalises using its configuration.
    RecordLoaded {
        /// Ticket of the originating fetch.
        ticket: RequestTicket,
        /// Undecoded project-details payload.
        record: ProjectRecord,
    },
    /// A project-details fetch failed.
    SnapshotFailed {
        /// Ticket of the originating fetch.
        ticket: RequestTicket,
        /// Failure description.
        reason: String,
    },
    /// A task was created.
    TaskCreated {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Created task.
        task: Task,
    },
    /// A task was deleted.
    TaskDeleted {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Deleted task.
        task_id: TaskId,
    },
    /// A comment was created.
    CommentCreated {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Commented task.
        task_id: TaskId,
        /// Created comment.
        comment: Comment,
    },
    /// A create, delete or comment request failed.
    MutationRejected {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Which mutation failed.
        kind: MutationKind,
        /// Failure description.
        reason: String,
    },
}
