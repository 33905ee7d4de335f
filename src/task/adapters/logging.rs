//! Log-only notifier adapters.
//!
//! Stand-ins for real email and calendar providers in development and
//! single-node deployments: they record the outbound notification via
//! `tracing` and report success without contacting any provider.

use crate::task::domain::CalendarEventRefs;
use crate::task::ports::{
    AssignmentNotice, CalendarScheduler, CompletionNotice, DueDateEvent, EmailNotifier,
    NotifyResult,
};
use crate::user::domain::EmailAddress;
use async_trait::async_trait;

/// Email notifier that logs instead of sending.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEmailNotifier;

#[async_trait]
impl EmailNotifier for LoggingEmailNotifier {
    async fn send_assignment(
        &self,
        recipient: &EmailAddress,
        notice: &AssignmentNotice,
    ) -> NotifyResult<()> {
        tracing::info!(
            recipient = %recipient,
            task = %notice.task_id,
            due = %notice.due_date,
            "assignment notification (log only)"
        );
        Ok(())
    }

    async fn send_completion(
        &self,
        recipient: &EmailAddress,
        notice: &CompletionNotice,
    ) -> NotifyResult<()> {
        tracing::info!(
            recipient = %recipient,
            task = %notice.task_id,
            completed_by = %notice.completed_by,
            "completion notification (log only)"
        );
        Ok(())
    }
}

/// Calendar scheduler that logs instead of scheduling.
///
/// Always returns an empty reference mapping, so nothing is persisted
/// onto the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCalendarScheduler;

#[async_trait]
impl CalendarScheduler for LoggingCalendarScheduler {
    async fn schedule(&self, event: &DueDateEvent) -> NotifyResult<CalendarEventRefs> {
        tracing::info!(
            attendee = %event.attendee,
            due = %event.due_date,
            "calendar event (log only)"
        );
        Ok(CalendarEventRefs::new())
    }
}
