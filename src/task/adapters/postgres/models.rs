//! Diesel row models for task persistence.

use super::schema::{task_logs, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Short summary.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Creator account.
    pub creator_id: uuid::Uuid,
    /// Assignee account.
    pub assignee_id: uuid::Uuid,
    /// Deadline.
    pub due_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Free-form note.
    pub note: Option<String>,
    /// Calendar reference JSON payload.
    pub calendar_event_refs: Option<Value>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Short summary.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Creator account.
    pub creator_id: uuid::Uuid,
    /// Assignee account.
    pub assignee_id: uuid::Uuid,
    /// Deadline.
    pub due_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Free-form note.
    pub note: Option<String>,
    /// Calendar reference JSON payload.
    pub calendar_event_refs: Option<Value>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for audit log entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Status before the change.
    pub previous_status: Option<String>,
    /// Status after the change.
    pub new_status: String,
    /// Attached comment.
    pub comment: Option<String>,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for audit log entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_logs)]
pub struct NewTaskLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Status before the change.
    pub previous_status: Option<String>,
    /// Status after the change.
    pub new_status: String,
    /// Attached comment.
    pub comment: Option<String>,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}
