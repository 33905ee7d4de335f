//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("task title must not exceed {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The due date is not strictly in the future.
    #[error("due date must be in the future")]
    DueDateNotFuture,

    /// The comment is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing calendar providers from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown calendar provider: {0}")]
pub struct ParseCalendarProviderError(pub String);
