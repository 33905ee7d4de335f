//! Error taxonomy mapping service failures to transport status codes.

use crate::task::services::{TaskAnalyticsError, TaskLifecycleError, TaskQueryError};
use crate::user::services::UserDirectoryError;
use thiserror::Error;

/// Transport-facing error with an HTTP-style status code.
///
/// Service errors collapse into five categories; internal failures keep
/// their source chained for logging but expose only a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or semantically invalid input (400).
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials (401).
    #[error("authentication required")]
    Unauthorized,

    /// Authenticated but not permitted (403).
    #[error("{0}")]
    Forbidden(String),

    /// The target resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure (500).
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(inner) => Self::Validation(inner.to_string()),
            TaskLifecycleError::InvalidAssignee(_) => Self::Validation(err.to_string()),
            TaskLifecycleError::TaskNotFound(_) => Self::NotFound(err.to_string()),
            TaskLifecycleError::NotAuthorized { .. } | TaskLifecycleError::AdminRequired(_) => {
                Self::Forbidden(err.to_string())
            }
            TaskLifecycleError::TaskStore(_)
            | TaskLifecycleError::LogStore(_)
            | TaskLifecycleError::UserStore(_) => Self::Internal(Box::new(err)),
        }
    }
}

impl From<TaskQueryError> for ApiError {
    fn from(err: TaskQueryError) -> Self {
        match err {
            TaskQueryError::TaskNotFound(_) => Self::NotFound(err.to_string()),
            TaskQueryError::NotAuthorized { .. } | TaskQueryError::AdminRequired(_) => {
                Self::Forbidden(err.to_string())
            }
            TaskQueryError::TaskStore(_)
            | TaskQueryError::LogStore(_)
            | TaskQueryError::UserStore(_) => Self::Internal(Box::new(err)),
        }
    }
}

impl From<TaskAnalyticsError> for ApiError {
    fn from(err: TaskAnalyticsError) -> Self {
        match err {
            TaskAnalyticsError::AdminRequired(_) => Self::Forbidden(err.to_string()),
            TaskAnalyticsError::TaskStore(_) | TaskAnalyticsError::UserStore(_) => {
                Self::Internal(Box::new(err))
            }
        }
    }
}

impl From<UserDirectoryError> for ApiError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Domain(inner) => Self::Validation(inner.to_string()),
            UserDirectoryError::EmailTaken | UserDirectoryError::HasOpenTasks { .. } => {
                Self::Validation(err.to_string())
            }
            UserDirectoryError::UserNotFound(_) => Self::NotFound(err.to_string()),
            UserDirectoryError::AdminRequired(_) => Self::Forbidden(err.to_string()),
            UserDirectoryError::UserStore(_) | UserDirectoryError::TaskStore(_) => {
                Self::Internal(Box::new(err))
            }
        }
    }
}
