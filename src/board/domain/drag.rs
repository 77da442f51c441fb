//! Bookkeeping for one pointer-driven drag gesture.

use super::{TaskId, TaskStatus, TaskStore};

/// Result of ending a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was active, or the gesture ended on a different card.
    NoSession,
    /// The card was released outside any column.
    NoTarget,
    /// The card was released on the column it already sits in.
    Unchanged,
    /// The dragged task disappeared from the store during the gesture.
    Vanished,
    /// The card moved to another column.
    Transition {
        /// The dragged task.
        task_id: TaskId,
        /// The column it was dropped on.
        status: TaskStatus,
    },
}

/// Resolves a drop-target identifier to a column.
///
/// Targets that are not column identifiers (for example another card) are
/// treated as "no target".
#[must_use]
pub fn resolve_drop_target(target: Option<&str>) -> Option<TaskStatus> {
    target.and_then(|raw| TaskStatus::try_from(raw).ok())
}

/// Drag session state: idle, or dragging a captured task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    subject: Option<TaskId>,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self { subject: None }
    }

    /// Captures a task at drag start.
    ///
    /// Returns `false` and keeps the current subject when a drag is already
    /// active.
    pub fn start(&mut self, task_id: TaskId) -> bool {
        if let Some(active) = &self.subject {
            tracing::debug!(active = %active, ignored = %task_id, "drag already active");
            return false;
        }
        self.subject = Some(task_id);
        true
    }

    /// Ends the gesture and decides whether a status change is due.
    ///
    /// The session is idle afterwards regardless of the outcome.
    pub fn finish(
        &mut self,
        task_id: &TaskId,
        target: Option<TaskStatus>,
        store: &TaskStore,
    ) -> DropOutcome {
        let Some(subject) = self.subject.take() else {
            return DropOutcome::NoSession;
        };
        if &subject != task_id {
            tracing::debug!(subject = %subject, ended = %task_id, "drag end for a different card");
            return DropOutcome::NoSession;
        }
        let Some(status) = target else {
            return DropOutcome::NoTarget;
        };
        match store.status_of(&subject) {
            None => DropOutcome::Vanished,
            Some(current) if current == status => DropOutcome::Unchanged,
            Some(_) => DropOutcome::Transition {
                task_id: subject,
                status,
            },
        }
    }

    /// Abandons the gesture without a status change.
    pub fn cancel(&mut self) {
        self.subject = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.subject.is_some()
    }

    /// Returns the captured task, if any.
    #[must_use]
    pub const fn subject(&self) -> Option<&TaskId> {
        self.subject.as_ref()
    }

    /// Returns `true` when `task_id` is the current drag subject.
    #[must_use]
    pub fn is_dragging(&self, task_id: &TaskId) -> bool {
        self.subject.as_ref() == Some(task_id)
    }
}
