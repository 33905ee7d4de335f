//! Domain model for task assignment and tracking.
//!
//! Tasks carry a four-state lifecycle, a priority, and optional calendar
//! references; every change is mirrored by an append-only audit log
//! entry. Infrastructure concerns stay outside the domain boundary.

mod error;
mod ids;
mod log;
mod task;

pub use error::{
    ParseCalendarProviderError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{TaskId, TaskLogId};
pub use log::{PersistedTaskLogData, TaskLogEntry};
pub use task::{
    CalendarEventRefs, CalendarProvider, PersistedTaskData, Task, TaskPriority, TaskSpec,
    TaskStatus,
};
