//! In-memory audit log repository for lifecycle tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskId, TaskLogEntry, TaskLogId},
    ports::{TaskLogRepository, TaskLogRepositoryError, TaskLogRepositoryResult},
};

/// Thread-safe in-memory audit log repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskLogRepository {
    state: Arc<RwLock<InMemoryLogState>>,
}

#[derive(Debug, Default)]
struct InMemoryLogState {
    entries: Vec<TaskLogEntry>,
    ids: HashSet<TaskLogId>,
}

impl InMemoryTaskLogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskLogRepository for InMemoryTaskLogRepository {
    async fn append(&self, entry: &TaskLogEntry) -> TaskLogRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.ids.insert(entry.id()) {
            return Err(TaskLogRepositoryError::DuplicateEntry(entry.id()));
        }
        state.entries.push(entry.clone());
        Ok(())
    }

    async fn for_task(&self, task_id: TaskId) -> TaskLogRepositoryResult<Vec<TaskLogEntry>> {
        let state = self.state.read().map_err(|err| {
            TaskLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        // Insertion order is chronological; equal timestamps keep a
        // deterministic newest-first order by reversing after a stable
        // ascending sort.
        let mut entries: Vec<TaskLogEntry> = state
            .entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        entries.sort_by_key(TaskLogEntry::created_at);
        entries.reverse();
        Ok(entries)
    }
}
