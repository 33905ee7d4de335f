//! Port contracts for task assignment and tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod repository;

pub use notifier::{
    AssignmentNotice, CalendarScheduler, CompletionNotice, DueDateEvent, EmailNotifier,
    NotifyError, NotifyResult,
};
pub use repository::{
    TaskFilter, TaskLogRepository, TaskLogRepositoryError, TaskLogRepositoryResult,
    TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
