//! Repository ports for task and audit log persistence.

use crate::task::domain::{Task, TaskId, TaskLogEntry, TaskLogId, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for audit log repository operations.
pub type TaskLogRepositoryResult<T> = Result<T, TaskLogRepositoryError>;

/// Filter criteria for task listings.
///
/// All criteria are conjunctive. `participant` scopes visibility to tasks
/// the user created or is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to a single status.
    pub status: Option<TaskStatus>,
    /// Restrict to a single priority.
    pub priority: Option<TaskPriority>,
    /// Keep tasks due at or after this instant.
    pub due_after: Option<DateTime<Utc>>,
    /// Keep tasks due at or before this instant.
    pub due_before: Option<DateTime<Utc>>,
    /// Restrict to a single assignee.
    pub assignee: Option<UserId>,
    /// Case-insensitive substring matched against title and description.
    pub text: Option<String>,
    /// Visibility scope: tasks the user created or is assigned to.
    pub participant: Option<UserId>,
}

impl TaskFilter {
    /// Creates an unrestricted filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a single status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a single priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to a due-date range (inclusive on both ends).
    #[must_use]
    pub const fn with_due_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.due_after = Some(start);
        self.due_before = Some(end);
        self
    }

    /// Restricts to a single assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Adds a text search over title and description.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Scopes visibility to tasks the user created or is assigned to.
    #[must_use]
    pub const fn with_participant(mut self, user_id: UserId) -> Self {
        self.participant = Some(user_id);
        self
    }
}

/// Task persistence contract.
///
/// Listings are ordered newest-first by creation timestamp. Concurrent
/// updates to the same task resolve last-writer-wins; no optimistic
/// concurrency token exists.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks matching the filter, newest-first.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts non-completed tasks the user created or is assigned to.
    async fn count_open_for_user(&self, user_id: UserId) -> TaskRepositoryResult<u64>;
}

/// Append-only audit log persistence contract.
#[async_trait]
pub trait TaskLogRepository: Send + Sync {
    /// Appends a new log entry. Entries are never mutated or deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLogRepositoryError::DuplicateEntry`] when the entry
    /// identifier already exists.
    async fn append(&self, entry: &TaskLogEntry) -> TaskLogRepositoryResult<()>;

    /// Returns every entry for a task, newest-first.
    async fn for_task(&self, task_id: TaskId) -> TaskLogRepositoryResult<Vec<TaskLogEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by audit log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskLogRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate log entry identifier: {0}")]
    DuplicateEntry(TaskLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
