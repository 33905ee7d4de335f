//! Notification ports for email and calendar side effects.
//!
//! Both ports carry a non-propagation contract: the lifecycle service
//! invokes them after the core mutation has been persisted, logs any
//! failure, and never surfaces it to the caller. Implementations must not
//! retry on their own.

use crate::task::domain::{CalendarEventRefs, TaskId};
use crate::user::domain::EmailAddress;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Content of a task assignment email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentNotice {
    /// Task being assigned.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task deadline.
    pub due_date: DateTime<Utc>,
}

/// Content of a task completion email sent to the creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionNotice {
    /// Task that was completed.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Display name of the user who completed the task.
    pub completed_by: String,
}

/// Request to schedule a calendar event for a task deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDateEvent {
    /// Event title, taken from the task title.
    pub title: String,
    /// Event body, taken from the task description.
    pub description: String,
    /// Event instant, the task due date.
    pub due_date: DateTime<Utc>,
    /// Attendee, the task assignee.
    pub attendee: EmailAddress,
}

/// Outbound email contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Sends an assignment notification to the assignee.
    async fn send_assignment(
        &self,
        recipient: &EmailAddress,
        notice: &AssignmentNotice,
    ) -> NotifyResult<()>;

    /// Sends a completion notification to the task creator.
    async fn send_completion(
        &self,
        recipient: &EmailAddress,
        notice: &CompletionNotice,
    ) -> NotifyResult<()>;
}

/// Calendar scheduling contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarScheduler: Send + Sync {
    /// Schedules a due-date event with the configured providers.
    ///
    /// Returns the provider-to-event-id mapping for the events that were
    /// created; an empty mapping means no provider accepted the event.
    async fn schedule(&self, event: &DueDateEvent) -> NotifyResult<CalendarEventRefs>;
}

/// Errors returned by notification implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The provider rejected or failed to deliver the notification.
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    /// No provider is configured for this notification kind.
    #[error("no notification provider configured")]
    Unconfigured,
}
