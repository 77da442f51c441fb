//! User-facing failure notices.

use std::collections::VecDeque;

/// Category of a surfaced failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// A status change was rejected by the server.
    TransitionRejected,
    /// A create, delete or comment request was rejected.
    MutationRejected,
    /// The project-details fetch failed.
    FetchFailed,
}

/// A failure the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Failure category.
    pub kind: NoticeKind,
    /// Actionable message.
    pub message: String,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Bounded FIFO of notices; the oldest is dropped when full.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    capacity: usize,
    notices: VecDeque<Notice>,
}

impl NoticeQueue {
    /// Creates an empty queue holding at most `capacity` notices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            notices: VecDeque::with_capacity(capacity),
        }
    }

    /// Queues a notice.
    pub fn push(&mut self, notice: Notice) {
        if self.capacity == 0 {
            return;
        }
        while self.notices.len() >= self.capacity {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Iterates queued notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Removes and returns every queued notice.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Discards every queued notice.
    pub fn clear(&mut self) {
        self.notices.clear();
    }

    /// Returns the number of queued notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Returns `true` when no notices are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
