//! Service layer for task creation, status updates, comments, and bulk
//! changes.

use crate::access::{self, Actor};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskLogEntry, TaskPriority, TaskSpec, TaskStatus},
    ports::{
        AssignmentNotice, CalendarScheduler, CompletionNotice, DueDateEvent, EmailNotifier,
        TaskLogRepository, TaskLogRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    assignee_id: UserId,
    due_date: DateTime<Utc>,
    priority: Option<TaskPriority>,
    note: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assignee_id: UserId,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            assignee_id,
            due_date,
            priority: None,
            note: None,
        }
    }

    /// Sets the priority; defaults to [`TaskPriority::Medium`] if omitted.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a free-form note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Outcome of a bulk status update.
///
/// The pass is best-effort with no rollback: tasks updated before a
/// failure stay updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUpdateOutcome {
    /// Tasks that were updated, in request order.
    pub updated: Vec<TaskId>,
    /// Requested identifiers that matched no task.
    pub missing: Vec<TaskId>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The assignee does not exist or is deactivated.
    #[error("invalid or inactive assignee: {0}")]
    InvalidAssignee(UserId),

    /// The actor may not perform this operation on the task.
    #[error("user {actor} may not modify task {task}")]
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

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Owns the create/update/comment workflows: every mutation pairs a task
/// write with exactly one audit log append, and notification side effects
/// run afterwards under a log-and-swallow contract.
#[derive(Clone)]
pub struct TaskLifecycleService<T, L, U, E, S, C>
where
    T: TaskRepository,
    L: TaskLogRepository,
    U: UserRepository,
    E: EmailNotifier,
    S: CalendarScheduler,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    logs: Arc<L>,
    users: Arc<U>,
    email: Arc<E>,
    calendar: Arc<S>,
    clock: Arc<C>,
}

impl<T, L, U, E, S, C> TaskLifecycleService<T, L, U, E, S, C>
where
    T: TaskRepository,
    L: TaskLogRepository,
    U: UserRepository,
    E: EmailNotifier,
    S: CalendarScheduler,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        logs: Arc<L>,
        users: Arc<U>,
        email: Arc<E>,
        calendar: Arc<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            logs,
            users,
            email,
            calendar,
            clock,
        }
    }

    /// Creates a task and its creation log entry, then fans out
    /// assignment email and calendar scheduling.
    ///
    /// The two side effects are independently fenced: a failure in either
    /// is logged and swallowed, and never rolls back the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails,
    /// [`TaskLifecycleError::InvalidAssignee`] when the assignee is
    /// missing or deactivated, or a store error when persistence rejects
    /// the write.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let assignee = self
            .users
            .find_by_id(request.assignee_id)
            .await?
            .filter(User::is_active)
            .ok_or(TaskLifecycleError::InvalidAssignee(request.assignee_id))?;

        let mut task = Task::create(
            TaskSpec {
                title: request.title,
                description: request.description,
                creator_id: actor.id(),
                assignee_id: request.assignee_id,
                due_date: request.due_date,
                priority: request.priority,
                note: request.note,
            },
            &*self.clock,
        )?;

        self.tasks.store(&task).await?;
        self.logs
            .append(&TaskLogEntry::creation(task.id(), actor.id(), &*self.clock))
            .await?;

        self.notify_assignment(&task, &assignee).await;
        self.schedule_due_date(&mut task, &assignee).await;

        Ok(task)
    }

    /// Moves a task to a new status and records the transition.
    ///
    /// Completion stamps `completed_at` (refreshing it on re-completion)
    /// and triggers a best-effort completion email to the creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist, [`TaskLifecycleError::NotAuthorized`] when the actor is
    /// neither admin nor assignee, or a store error when persistence
    /// rejects the write.
    pub async fn update_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        new_status: TaskStatus,
        comment: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;

        if !access::can_update_status(actor, &task) {
            return Err(TaskLifecycleError::NotAuthorized {
                actor: actor.id(),
                task: task_id,
            });
        }

        let previous_status = task.status();
        task.set_status(new_status, &*self.clock);
        self.tasks.update(&task).await?;
        self.logs
            .append(&TaskLogEntry::transition(
                task_id,
                actor.id(),
                previous_status,
                new_status,
                comment,
                &*self.clock,
            ))
            .await?;

        if new_status == TaskStatus::Completed {
            self.notify_completion(actor, &task).await;
        }

        Ok(task)
    }

    /// Appends a comment-only entry to a task's history.
    ///
    /// The task row itself is not mutated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the comment is empty,
    /// [`TaskLifecycleError::TaskNotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::NotAuthorized`] when the actor is neither
    /// admin, creator, nor assignee.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        task_id: TaskId,
        comment: impl Into<String> + Send,
    ) -> TaskLifecycleResult<TaskLogEntry> {
        let text = comment.into().trim().to_owned();
        if text.is_empty() {
            return Err(TaskDomainError::EmptyComment.into());
        }

        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;

        if !access::can_access_task(actor, &task) {
            return Err(TaskLifecycleError::NotAuthorized {
                actor: actor.id(),
                task: task_id,
            });
        }

        let entry = TaskLogEntry::comment_only(task_id, actor.id(), task.status(), text, &*self.clock);
        self.logs.append(&entry).await?;
        Ok(entry)
    }

    /// Applies a status to every listed task in one sequential pass.
    ///
    /// Admin only. The true previous status is captured per task before
    /// each write. Missing identifiers are skipped and reported; there is
    /// no rollback across the set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AdminRequired`] for non-admin actors
    /// or a store error when persistence rejects a write; earlier updates
    /// in the pass stay applied.
    pub async fn bulk_update_status(
        &self,
        actor: &Actor,
        task_ids: &[TaskId],
        new_status: TaskStatus,
        comment: Option<String>,
    ) -> TaskLifecycleResult<BulkUpdateOutcome> {
        if !actor.is_admin() {
            return Err(TaskLifecycleError::AdminRequired(actor.id()));
        }

        let note =
            comment.unwrap_or_else(|| format!("Bulk status update to {new_status}"));
        let mut outcome = BulkUpdateOutcome::default();

        for &task_id in task_ids {
            let Some(mut task) = self.tasks.find_by_id(task_id).await? else {
                outcome.missing.push(task_id);
                continue;
            };

            let previous_status = task.status();
            task.set_status(new_status, &*self.clock);
            self.tasks.update(&task).await?;
            self.logs
                .append(&TaskLogEntry::transition(
                    task_id,
                    actor.id(),
                    previous_status,
                    new_status,
                    Some(note.clone()),
                    &*self.clock,
                ))
                .await?;
            outcome.updated.push(task_id);
        }

        Ok(outcome)
    }

    /// Best-effort assignment email; failure is logged and swallowed.
    async fn notify_assignment(&self, task: &Task, assignee: &User) {
        let notice = AssignmentNotice {
            task_id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
        };
        if let Err(err) = self.email.send_assignment(assignee.email(), &notice).await {
            tracing::warn!(task = %task.id(), error = %err, "assignment email failed");
        }
    }

    /// Best-effort calendar scheduling; on success the returned event
    /// references are persisted onto the task. Failure anywhere in the
    /// chain is logged and swallowed.
    async fn schedule_due_date(&self, task: &mut Task, assignee: &User) {
        let event = DueDateEvent {
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            attendee: assignee.email().clone(),
        };
        match self.calendar.schedule(&event).await {
            Ok(refs) if !refs.is_empty() => {
                task.attach_calendar_refs(refs, &*self.clock);
                if let Err(err) = self.tasks.update(task).await {
                    tracing::warn!(task = %task.id(), error = %err, "persisting calendar refs failed");
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(task = %task.id(), error = %err, "calendar scheduling failed");
            }
        }
    }

    /// Best-effort completion email to the creator; failure is logged and
    /// swallowed.
    async fn notify_completion(&self, actor: &Actor, task: &Task) {
        let creator = match self.users.find_by_id(task.creator_id()).await {
            Ok(Some(creator)) => creator,
            Ok(None) => {
                tracing::warn!(task = %task.id(), "completion notice skipped: creator missing");
                return;
            }
            Err(err) => {
                tracing::warn!(task = %task.id(), error = %err, "completion notice skipped");
                return;
            }
        };
        let notice = CompletionNotice {
            task_id: task.id(),
            title: task.title().to_owned(),
            completed_by: actor.name().to_owned(),
        };
        if let Err(err) = self.email.send_completion(creator.email(), &notice).await {
            tracing::warn!(task = %task.id(), error = %err, "completion email failed");
        }
    }
}
