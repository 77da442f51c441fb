//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// An identifier was empty after trimming.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Which identifier was being constructed.
        kind: &'static str,
    },

    /// A task title was empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A comment body was empty after trimming.
    #[error("comment content must not be empty")]
    EmptyComment,

    /// A comment author was empty after trimming.
    #[error("comment author must not be empty")]
    EmptyAuthor,
}

/// Error returned while parsing a task status or column identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
