//! Aggregated task statistics for the admin dashboard.

use crate::access::Actor;
use crate::task::{
    domain::{Task, TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{UserId, UserIdentity},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Workload summary for one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssigneeWorkload {
    /// Assignee identity, if the user row is still present.
    pub assignee: Option<UserIdentity>,
    /// Tasks assigned in total.
    pub total: usize,
    /// Tasks not yet completed.
    pub open: usize,
    /// Tasks currently in progress.
    pub in_progress: usize,
    /// Tasks completed.
    pub completed: usize,
}

/// Aggregate view over every task in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsOverview {
    /// Total number of tasks.
    pub total: usize,
    /// Task counts per lifecycle status.
    pub by_status: BTreeMap<TaskStatus, usize>,
    /// Task counts per priority.
    pub by_priority: BTreeMap<TaskPriority, usize>,
    /// Tasks past their due date and not completed.
    pub overdue: usize,
    /// Per-assignee workload, heaviest first.
    pub per_assignee: Vec<AssigneeWorkload>,
}

/// Service-level errors for analytics operations.
#[derive(Debug, Error)]
pub enum TaskAnalyticsError {
    /// The operation requires administrative rights.
    #[error("user {0} lacks administrator rights")]
    AdminRequired(UserId),

    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),

    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserRepositoryError),
}

/// Result type for analytics operations.
pub type TaskAnalyticsResult<T> = Result<T, TaskAnalyticsError>;

/// Computes aggregate statistics over the task store.
///
/// Counts are derived on demand from a full listing rather than kept as
/// materialized aggregates.
#[derive(Clone)]
pub struct TaskAnalyticsService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> TaskAnalyticsService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new analytics service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Builds the full analytics overview.
    ///
    /// Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAnalyticsError::AdminRequired`] for non-admin actors
    /// or a store error when a repository lookup fails.
    pub async fn overview(&self, actor: &Actor) -> TaskAnalyticsResult<AnalyticsOverview> {
        if !actor.is_admin() {
            return Err(TaskAnalyticsError::AdminRequired(actor.id()));
        }

        let tasks = self.tasks.list(&TaskFilter::default()).await?;
        let now = self.clock.utc();

        let mut by_status: BTreeMap<TaskStatus, usize> = BTreeMap::new();
        let mut by_priority: BTreeMap<TaskPriority, usize> = BTreeMap::new();
        let mut overdue = 0;
        for task in &tasks {
            *by_status.entry(task.status()).or_default() += 1;
            *by_priority.entry(task.priority()).or_default() += 1;
            if task.is_overdue(now) {
                overdue += 1;
            }
        }

        let per_assignee = self.workloads(&tasks).await?;

        Ok(AnalyticsOverview {
            total: tasks.len(),
            by_status,
            by_priority,
            overdue,
            per_assignee,
        })
    }

    /// Groups tasks by assignee and orders the result heaviest first,
    /// breaking ties by assignee id for a stable order.
    async fn workloads(&self, tasks: &[Task]) -> TaskAnalyticsResult<Vec<AssigneeWorkload>> {
        let mut grouped: BTreeMap<UserId, (usize, usize, usize, usize)> = BTreeMap::new();
        for task in tasks {
            let counts = grouped.entry(task.assignee_id()).or_default();
            counts.0 += 1;
            if task.is_open() {
                counts.1 += 1;
            } else {
                counts.3 += 1;
            }
            if task.status() == TaskStatus::InProgress {
                counts.2 += 1;
            }
        }

        let ids: Vec<UserId> = grouped.keys().copied().collect();
        let users = self.users.find_by_ids(&ids).await?;
        let identities: BTreeMap<UserId, UserIdentity> = users
            .iter()
            .map(|user| (user.id(), user.identity()))
            .collect();

        let mut workloads: Vec<AssigneeWorkload> = grouped
            .into_iter()
            .map(|(id, (total, open, in_progress, completed))| AssigneeWorkload {
                assignee: identities.get(&id).cloned(),
                total,
                open,
                in_progress,
                completed,
            })
            .collect();
        workloads.sort_by(|a, b| b.total.cmp(&a.total));
        Ok(workloads)
    }
}
