//! `PostgreSQL` repository implementations for task lifecycle storage.

use super::{
    models::{NewTaskLogRow, NewTaskRow, TaskLogRow, TaskRow},
    schema::{task_logs, tasks},
};
use crate::task::{
    domain::{
        CalendarEventRefs, PersistedTaskData, PersistedTaskLogData, Task, TaskId, TaskLogEntry,
        TaskLogId, TaskPriority, TaskStatus,
    },
    ports::{
        TaskFilter, TaskLogRepository, TaskLogRepositoryError, TaskLogRepositoryResult,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set((
                    tasks::title.eq(row.title),
                    tasks::description.eq(row.description),
                    tasks::due_date.eq(row.due_date),
                    tasks::status.eq(row.status),
                    tasks::priority.eq(row.priority),
                    tasks::note.eq(row.note),
                    tasks::calendar_event_refs.eq(row.calendar_event_refs),
                    tasks::completed_at.eq(row.completed_at),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.into_boxed();
            if let Some(status) = criteria.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = criteria.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(start) = criteria.due_after {
                query = query.filter(tasks::due_date.ge(start));
            }
            if let Some(end) = criteria.due_before {
                query = query.filter(tasks::due_date.le(end));
            }
            if let Some(assignee) = criteria.assignee {
                query = query.filter(tasks::assignee_id.eq(assignee.into_inner()));
            }
            if let Some(participant) = criteria.participant {
                let uid = participant.into_inner();
                query = query.filter(tasks::creator_id.eq(uid).or(tasks::assignee_id.eq(uid)));
            }
            if let Some(text) = &criteria.text {
                let pattern = format!("%{text}%");
                query = query.filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .or(tasks::description.ilike(pattern)),
                );
            }

            let rows = query
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_open_for_user(&self, user_id: UserId) -> TaskRepositoryResult<u64> {
        let uid = user_id.into_inner();
        self.run_blocking(move |connection| {
            let open: i64 = tasks::table
                .filter(tasks::creator_id.eq(uid).or(tasks::assignee_id.eq(uid)))
                .filter(tasks::status.ne(TaskStatus::Completed.as_str()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(u64::try_from(open).unwrap_or_default())
        })
        .await
    }
}

/// `PostgreSQL`-backed audit log repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskLogRepository {
    pool: TaskPgPool,
}

impl PostgresTaskLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskLogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskLogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskLogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskLogRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskLogRepository for PostgresTaskLogRepository {
    async fn append(&self, entry: &TaskLogEntry) -> TaskLogRepositoryResult<()> {
        let entry_id = entry.id();
        let new_row = to_new_log_row(entry);

        self.run_blocking(move |connection| {
            diesel::insert_into(task_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskLogRepositoryError::DuplicateEntry(entry_id)
                    }
                    _ => TaskLogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn for_task(&self, task_id: TaskId) -> TaskLogRepositoryResult<Vec<TaskLogEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_logs::table
                .filter(task_logs::task_id.eq(task_id.into_inner()))
                .order(task_logs::created_at.desc())
                .select(TaskLogRow::as_select())
                .load::<TaskLogRow>(connection)
                .map_err(TaskLogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_log_entry).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let calendar_event_refs = task
        .calendar_event_refs()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        creator_id: task.creator_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        note: task.note().map(str::to_owned),
        calendar_event_refs,
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let calendar_event_refs = row
        .calendar_event_refs
        .map(serde_json::from_value::<CalendarEventRefs>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        creator_id: UserId::from_uuid(row.creator_id),
        assignee_id: UserId::from_uuid(row.assignee_id),
        due_date: row.due_date,
        status,
        priority,
        note: row.note,
        calendar_event_refs,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_new_log_row(entry: &TaskLogEntry) -> NewTaskLogRow {
    NewTaskLogRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        user_id: entry.user_id().into_inner(),
        previous_status: entry.previous_status().map(|status| status.as_str().to_owned()),
        new_status: entry.new_status().as_str().to_owned(),
        comment: entry.comment().map(str::to_owned),
        created_at: entry.created_at(),
    }
}

fn row_to_log_entry(row: TaskLogRow) -> TaskLogRepositoryResult<TaskLogEntry> {
    let previous_status = row
        .previous_status
        .as_deref()
        .map(TaskStatus::try_from)
        .transpose()
        .map_err(TaskLogRepositoryError::persistence)?;
    let new_status =
        TaskStatus::try_from(row.new_status.as_str()).map_err(TaskLogRepositoryError::persistence)?;

    Ok(TaskLogEntry::from_persisted(PersistedTaskLogData {
        id: TaskLogId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        previous_status,
        new_status,
        comment: row.comment,
        created_at: row.created_at,
    }))
}
