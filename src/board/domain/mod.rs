//! Domain model for the task board.
//!
//! Everything here is synchronous and free of I/O: identifiers and records,
//! the task store, the column projection, the drag session, and the events
//! and commands exchanged with the services layer.

mod columns;
mod config;
mod drag;
mod error;
mod event;
mod ids;
mod notice;
mod project;
mod status;
mod store;
mod task;

pub use columns::{Column, Columns, project_columns};
pub use config::BoardConfig;
pub use drag::{DragSession, DropOutcome, resolve_drop_target};
pub use error::{BoardDomainError, ParseTaskStatusError};
pub use event::{
    BoardCommand, BoardEvent, MutationKind, RequestTicket, TransitionRequest,
};
pub use ids::{CommentId, ProjectId, TaskId};
pub use notice::{Notice, NoticeKind, NoticeQueue};
pub use project::{ProjectDetails, ProjectRecord, ProjectSummary};
pub use status::{ProjectStatus, TaskStatus};
pub use store::TaskStore;
pub use task::{Comment, CommentRecord, NewComment, NewTask, Task, TaskRecord};
