//! Board behaviour configuration.

use super::TaskStatus;

/// Tunable behaviour of a task board.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{BoardConfig, TaskStatus};
///
/// let config = BoardConfig::default();
/// assert!(config.rollback_on_rejection);
/// assert_eq!(config.unknown_status_column, TaskStatus::Todo);
///
/// let observed = BoardConfig::observed();
/// assert!(!observed.rollback_on_rejection);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Revert a rejected status change to the last confirmed status.
    pub rollback_on_rejection: bool,
    /// Column used for tasks whose server status is not recognised.
    pub unknown_status_column: TaskStatus,
    /// Maximum number of queued user notices.
    pub notice_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rollback_on_rejection: true,
            unknown_status_column: TaskStatus::Todo,
            notice_capacity: 16,
        }
    }
}

impl BoardConfig {
    /// Keeps optimistic state after a rejection, only surfacing a notice.
    ///
    /// Matches the behaviour of the legacy web client.
    #[must_use]
    pub fn observed() -> Self {
        Self {
            rollback_on_rejection: false,
            ..Self::default()
        }
    }

    /// Sets the notice queue capacity.
    #[must_use]
    pub const fn with_notice_capacity(mut self, capacity: usize) -> Self {
        self.notice_capacity = capacity;
        self
    }
}
