//! In-memory task repository for lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(status) = filter.status
        && task.status() != status
    {
        return false;
    }
    if let Some(priority) = filter.priority
        && task.priority() != priority
    {
        return false;
    }
    if let Some(start) = filter.due_after
        && task.due_date() < start
    {
        return false;
    }
    if let Some(end) = filter.due_before
        && task.due_date() > end
    {
        return false;
    }
    if let Some(assignee) = filter.assignee
        && task.assignee_id() != assignee
    {
        return false;
    }
    if let Some(participant) = filter.participant
        && !task.involves(participant)
    {
        return false;
    }
    if let Some(text) = &filter.text {
        let needle = text.to_ascii_lowercase();
        let in_title = task.title().to_ascii_lowercase().contains(&needle);
        let in_description = task.description().to_ascii_lowercase().contains(&needle);
        if !in_title && !in_description {
            return false;
        }
    }
    true
}

fn count_open(state: &InMemoryTaskState, user_id: UserId) -> u64 {
    let open = state
        .tasks
        .values()
        .filter(|task| task.involves(user_id) && task.status() != TaskStatus::Completed)
        .count();
    u64::try_from(open).unwrap_or(u64::MAX)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| matches_filter(task, filter))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(tasks)
    }

    async fn count_open_for_user(&self, user_id: UserId) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(count_open(&state, user_id))
    }
}
