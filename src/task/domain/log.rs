//! Append-only audit log entries for task history.

use super::{TaskId, TaskLogId, TaskStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// One audit log entry.
///
/// Exactly one entry accompanies every task creation, status change, and
/// comment. Entries are never mutated or deleted; the sequence for a task
/// is its complete history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskLogEntry {
    id: TaskLogId,
    task_id: TaskId,
    user_id: UserId,
    previous_status: Option<TaskStatus>,
    new_status: TaskStatus,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskLogData {
    /// Persisted entry identifier.
    pub id: TaskLogId,
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted acting user.
    pub user_id: UserId,
    /// Persisted prior status; `None` only on the creation entry.
    pub previous_status: Option<TaskStatus>,
    /// Persisted resulting status.
    pub new_status: TaskStatus,
    /// Persisted comment, if any.
    pub comment: Option<String>,
    /// Persisted entry timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskLogEntry {
    /// Creates the entry recorded alongside task creation.
    #[must_use]
    pub fn creation(task_id: TaskId, actor: UserId, clock: &impl Clock) -> Self {
        Self {
            id: TaskLogId::new(),
            task_id,
            user_id: actor,
            previous_status: None,
            new_status: TaskStatus::NotStarted,
            comment: Some("Task created".to_owned()),
            created_at: clock.utc(),
        }
    }

    /// Creates the entry recorded alongside a status change.
    #[must_use]
    pub fn transition(
        task_id: TaskId,
        actor: UserId,
        previous_status: TaskStatus,
        new_status: TaskStatus,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskLogId::new(),
            task_id,
            user_id: actor,
            previous_status: Some(previous_status),
            new_status,
            comment,
            created_at: clock.utc(),
        }
    }

    /// Creates a comment-only entry.
    ///
    /// The unchanged status is recorded on both sides, which is what
    /// distinguishes a comment from a real transition.
    #[must_use]
    pub fn comment_only(
        task_id: TaskId,
        actor: UserId,
        current_status: TaskStatus,
        comment: String,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskLogId::new(),
            task_id,
            user_id: actor,
            previous_status: Some(current_status),
            new_status: current_status,
            comment: Some(comment),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskLogData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            previous_status: data.previous_status,
            new_status: data.new_status,
            comment: data.comment,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TaskLogId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the status before the change; `None` only on creation.
    #[must_use]
    pub const fn previous_status(&self) -> Option<TaskStatus> {
        self.previous_status
    }

    /// Returns the status after the change.
    #[must_use]
    pub const fn new_status(&self) -> TaskStatus {
        self.new_status
    }

    /// Returns the attached comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the entry timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether this entry records a comment rather than a real
    /// transition.
    #[must_use]
    pub fn is_comment_only(&self) -> bool {
        self.previous_status == Some(self.new_status)
    }
}
