//! Read-side service for task lists, detail views, timelines, and
//! exports.

use crate::access::{self, Actor};
use crate::task::{
    domain::{Task, TaskId, TaskLogEntry, TaskPriority, TaskStatus},
    ports::{
        TaskFilter, TaskLogRepository, TaskLogRepositoryError, TaskRepository,
        TaskRepositoryError,
    },
};
use crate::user::{
    domain::{UserId, UserIdentity},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// A task joined with the identities of its creator and assignee.
///
/// Identities are `None` when the referenced user row is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskWithParticipants {
    /// The task itself.
    pub task: Task,
    /// Creator identity, if still present.
    pub creator: Option<UserIdentity>,
    /// Assignee identity, if still present.
    pub assignee: Option<UserIdentity>,
}

/// One audit log entry joined with the acting user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// The audit log entry.
    pub entry: TaskLogEntry,
    /// Identity of the acting user, if still present.
    pub actor: Option<UserIdentity>,
}

/// A task joined with its full history, for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetail {
    /// The task with participant identities.
    pub task: TaskWithParticipants,
    /// Complete history, newest first.
    pub history: Vec<TimelineEntry>,
}

/// One flattened row of a task export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskExportRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Creator display name, if still present.
    pub creator: Option<String>,
    /// Assignee display name, if still present.
    pub assignee: Option<String>,
    /// Deadline.
    pub due_date: DateTime<Utc>,
    /// Completion timestamp, if ever completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Service-level errors for task read operations.
#[derive(Debug, Error)]
pub enum TaskQueryError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The actor may not view this task.
    #[error("user {actor} may not view task {task}")]
    NotAuthorized {
        /// Acting user.
        actor: UserId,
        /// Target task.
        task: TaskId,
    },

    /// The operation requires administrative rights.
    #[error("user {0} lacks administrator rights")]
    AdminRequired(UserId),

    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),

    /// Audit log operation failed.
    #[error(transparent)]
    LogStore(#[from] TaskLogRepositoryError),

    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserRepositoryError),
}

/// Result type for task read operations.
pub type TaskQueryResult<T> = Result<T, TaskQueryError>;

/// Read-side service over tasks and their audit logs.
///
/// Visibility scoping happens here: non-admin callers only ever receive
/// tasks they created or are assigned to.
#[derive(Clone)]
pub struct TaskQueryService<T, L, U>
where
    T: TaskRepository,
    L: TaskLogRepository,
    U: UserRepository,
{
    tasks: Arc<T>,
    logs: Arc<L>,
    users: Arc<U>,
}

impl<T, L, U> TaskQueryService<T, L, U>
where
    T: TaskRepository,
    L: TaskLogRepository,
    U: UserRepository,
{
    /// Creates a new task query service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, logs: Arc<L>, users: Arc<U>) -> Self {
        Self { tasks, logs, users }
    }

    /// Lists tasks matching the filter, newest first.
    ///
    /// Non-admin actors are silently scoped to tasks they participate
    /// in, regardless of what the filter asks for.
    ///
    /// # Errors
    ///
    /// Returns a store error when a repository lookup fails.
    pub async fn list_tasks(
        &self,
        actor: &Actor,
        filter: TaskFilter,
    ) -> TaskQueryResult<Vec<TaskWithParticipants>> {
        let scoped = if actor.is_admin() {
            filter
        } else {
            filter.with_participant(actor.id())
        };
        let tasks = self.tasks.list(&scoped).await?;
        self.join_participants(tasks).await
    }

    /// Free-text search over titles and descriptions, newest first.
    ///
    /// Non-admin actors are scoped to tasks they participate in.
    ///
    /// # Errors
    ///
    /// Returns a store error when a repository lookup fails.
    pub async fn search_tasks(
        &self,
        actor: &Actor,
        text: impl Into<String> + Send,
    ) -> TaskQueryResult<Vec<TaskWithParticipants>> {
        self.list_tasks(actor, TaskFilter::default().with_text(text.into()))
            .await
    }

    /// Fetches a single task with participants and full history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::TaskNotFound`] when the task does not
    /// exist, or [`TaskQueryError::NotAuthorized`] when the actor is
    /// neither admin, creator, nor assignee.
    pub async fn task_detail(&self, actor: &Actor, task_id: TaskId) -> TaskQueryResult<TaskDetail> {
        let task = self.authorized_task(actor, task_id).await?;
        let entries = self.logs.for_task(task_id).await?;
        let identities = self
            .identities(
                [task.creator_id(), task.assignee_id()]
                    .into_iter()
                    .chain(entries.iter().map(TaskLogEntry::user_id)),
            )
            .await?;

        let creator = identities.get(&task.creator_id()).cloned();
        let assignee = identities.get(&task.assignee_id()).cloned();
        let history = entries
            .into_iter()
            .map(|entry| {
                let entry_actor = identities.get(&entry.user_id()).cloned();
                TimelineEntry {
                    entry,
                    actor: entry_actor,
                }
            })
            .collect();

        Ok(TaskDetail {
            task: TaskWithParticipants {
                task,
                creator,
                assignee,
            },
            history,
        })
    }

    /// Fetches a task's full history, newest first, with actor
    /// identities joined in.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::TaskNotFound`] when the task does not
    /// exist, or [`TaskQueryError::NotAuthorized`] when the actor is
    /// neither admin, creator, nor assignee.
    pub async fn timeline(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskQueryResult<Vec<TimelineEntry>> {
        self.authorized_task(actor, task_id).await?;
        let entries = self.logs.for_task(task_id).await?;
        let identities = self
            .identities(entries.iter().map(TaskLogEntry::user_id))
            .await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let entry_actor = identities.get(&entry.user_id()).cloned();
                TimelineEntry {
                    entry,
                    actor: entry_actor,
                }
            })
            .collect())
    }

    /// Flattens every matching task into export records, newest first.
    ///
    /// Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::AdminRequired`] for non-admin actors or
    /// a store error when a repository lookup fails.
    pub async fn export_tasks(
        &self,
        actor: &Actor,
        filter: TaskFilter,
    ) -> TaskQueryResult<Vec<TaskExportRecord>> {
        if !actor.is_admin() {
            return Err(TaskQueryError::AdminRequired(actor.id()));
        }
        let joined = self.join_participants(self.tasks.list(&filter).await?).await?;
        Ok(joined
            .into_iter()
            .map(|item| TaskExportRecord {
                id: item.task.id(),
                title: item.task.title().to_owned(),
                status: item.task.status(),
                priority: item.task.priority(),
                creator: item.creator.map(|identity| identity.name),
                assignee: item.assignee.map(|identity| identity.name),
                due_date: item.task.due_date(),
                completed_at: item.task.completed_at(),
                created_at: item.task.created_at(),
            })
            .collect())
    }

    /// Loads a task and checks the actor may view it; 404 wins over 403
    /// so missing tasks are never confirmed to outsiders.
    async fn authorized_task(&self, actor: &Actor, task_id: TaskId) -> TaskQueryResult<Task> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskQueryError::TaskNotFound(task_id))?;
        if !access::can_access_task(actor, &task) {
            return Err(TaskQueryError::NotAuthorized {
                actor: actor.id(),
                task: task_id,
            });
        }
        Ok(task)
    }

    /// Resolves user identities in one batch lookup.
    async fn identities(
        &self,
        ids: impl Iterator<Item = UserId> + Send,
    ) -> TaskQueryResult<HashMap<UserId, UserIdentity>> {
        let mut unique: Vec<UserId> = ids.collect();
        unique.sort_unstable();
        unique.dedup();
        let users = self.users.find_by_ids(&unique).await?;
        Ok(users
            .iter()
            .map(|user| (user.id(), user.identity()))
            .collect())
    }

    async fn join_participants(
        &self,
        tasks: Vec<Task>,
    ) -> TaskQueryResult<Vec<TaskWithParticipants>> {
        let identities = self
            .identities(
                tasks
                    .iter()
                    .flat_map(|task| [task.creator_id(), task.assignee_id()]),
            )
            .await?;
        Ok(tasks
            .into_iter()
            .map(|task| {
                let creator = identities.get(&task.creator_id()).cloned();
                let assignee = identities.get(&task.assignee_id()).cloned();
                TaskWithParticipants {
                    task,
                    creator,
                    assignee,
                }
            })
            .collect())
    }
}
