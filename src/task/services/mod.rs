//! Application services orchestrating task workflows.

mod analytics;
mod lifecycle;
mod query;

#[cfg(test)]
mod analytics_tests;

pub use analytics::{
    AnalyticsOverview, AssigneeWorkload, TaskAnalyticsError, TaskAnalyticsResult,
    TaskAnalyticsService,
};
pub use lifecycle::{
    BulkUpdateOutcome, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
pub use query::{
    TaskDetail, TaskExportRecord, TaskQueryError, TaskQueryResult, TaskQueryService,
    TaskWithParticipants, TimelineEntry,
};
