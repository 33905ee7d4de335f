//! Unit tests for the in-memory task and audit log repositories.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use crate::task::{
    adapters::memory::{InMemoryTaskLogRepository, InMemoryTaskRepository},
    domain::{
        PersistedTaskData, PersistedTaskLogData, Task, TaskId, TaskLogEntry, TaskLogId,
        TaskPriority, TaskStatus,
    },
    ports::{
        TaskFilter, TaskLogRepository, TaskLogRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use crate::user::domain::UserId;
use chrono::{DateTime, Duration, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[fixture]
fn log_repo() -> InMemoryTaskLogRepository {
    InMemoryTaskLogRepository::new()
}

/// Builds a task with an explicit creation timestamp so ordering
/// assertions are deterministic.
fn task_created_at(
    title: &str,
    creator_id: UserId,
    assignee_id: UserId,
    created_at: DateTime<Utc>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: format!("{title} description"),
        creator_id,
        assignee_id,
        due_date: created_at + Duration::days(7),
        status: TaskStatus::NotStarted,
        priority: TaskPriority::Medium,
        note: None,
        calendar_event_refs: None,
        completed_at: None,
        created_at,
        updated_at: created_at,
    })
}

fn log_entry_at(task_id: TaskId, created_at: DateTime<Utc>, comment: &str) -> TaskLogEntry {
    TaskLogEntry::from_persisted(PersistedTaskLogData {
        id: TaskLogId::new(),
        task_id,
        user_id: UserId::new(),
        previous_status: Some(TaskStatus::NotStarted),
        new_status: TaskStatus::InProgress,
        comment: Some(comment.to_owned()),
        created_at,
    })
}

// ============================================================================
// Task repository contract
// ============================================================================

#[rstest]
#[tokio::test]
async fn store_then_find_round_trips(repo: InMemoryTaskRepository) {
    let task = task_created_at("Report", UserId::new(), UserId::new(), Utc::now());
    repo.store(&task).await.expect("store");

    let found = repo.find_by_id(task.id()).await.expect("find");
    assert_eq!(found, Some(task));
}

#[rstest]
#[tokio::test]
async fn store_rejects_duplicate_id(repo: InMemoryTaskRepository) {
    let task = task_created_at("Report", UserId::new(), UserId::new(), Utc::now());
    repo.store(&task).await.expect("first store");

    let result = repo.store(&task).await;
    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
#[tokio::test]
async fn update_rejects_unknown_task(repo: InMemoryTaskRepository) {
    let task = task_created_at("Report", UserId::new(), UserId::new(), Utc::now());
    let result = repo.update(&task).await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
#[tokio::test]
async fn find_missing_task_returns_none(repo: InMemoryTaskRepository) {
    let found = repo.find_by_id(TaskId::new()).await.expect("find");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn list_orders_newest_first(repo: InMemoryTaskRepository) {
    let base = Utc::now();
    let older = task_created_at("Older", UserId::new(), UserId::new(), base - Duration::hours(2));
    let newer = task_created_at("Newer", UserId::new(), UserId::new(), base);
    repo.store(&older).await.expect("store older");
    repo.store(&newer).await.expect("store newer");

    let listed = repo.list(&TaskFilter::default()).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title(), "Newer");
    assert_eq!(listed[1].title(), "Older");
}

#[rstest]
#[tokio::test]
async fn list_filters_by_participant(repo: InMemoryTaskRepository) {
    let alice = UserId::new();
    let bob = UserId::new();
    let now = Utc::now();
    let created_by_alice = task_created_at("By Alice", alice, bob, now);
    let assigned_to_alice = task_created_at("For Alice", bob, alice, now - Duration::hours(1));
    let unrelated = task_created_at("Other", bob, bob, now - Duration::hours(2));
    repo.store(&created_by_alice).await.expect("store");
    repo.store(&assigned_to_alice).await.expect("store");
    repo.store(&unrelated).await.expect("store");

    let listed = repo
        .list(&TaskFilter::default().with_participant(alice))
        .await
        .expect("list");
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|task| task.involves(alice)));
}

#[rstest]
#[tokio::test]
async fn list_filters_by_text_in_title_or_description(repo: InMemoryTaskRepository) {
    let now = Utc::now();
    let matching = task_created_at("Payroll audit", UserId::new(), UserId::new(), now);
    let other = task_created_at("Office move", UserId::new(), UserId::new(), now);
    repo.store(&matching).await.expect("store");
    repo.store(&other).await.expect("store");

    let listed = repo
        .list(&TaskFilter::default().with_text("PAYROLL"))
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title(), "Payroll audit");
}

#[rstest]
#[tokio::test]
async fn list_filters_by_due_date_range(repo: InMemoryTaskRepository) {
    let base = Utc::now();
    let inside = task_created_at("Inside", UserId::new(), UserId::new(), base);
    let outside = task_created_at("Outside", UserId::new(), UserId::new(), base + Duration::days(30));
    repo.store(&inside).await.expect("store");
    repo.store(&outside).await.expect("store");

    let listed = repo
        .list(
            &TaskFilter::default()
                .with_due_between(base + Duration::days(6), base + Duration::days(8)),
        )
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title(), "Inside");
}

#[rstest]
#[tokio::test]
async fn count_open_excludes_completed_and_strangers(repo: InMemoryTaskRepository) {
    let user = UserId::new();
    let now = Utc::now();
    let open = task_created_at("Open", user, UserId::new(), now);
    let completed = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Done".to_owned(),
        description: "Done description".to_owned(),
        creator_id: UserId::new(),
        assignee_id: user,
        due_date: now + Duration::days(7),
        status: TaskStatus::Completed,
        priority: TaskPriority::Medium,
        note: None,
        calendar_event_refs: None,
        completed_at: Some(now),
        created_at: now - Duration::hours(1),
        updated_at: now,
    });
    let unrelated = task_created_at("Other", UserId::new(), UserId::new(), now);
    repo.store(&open).await.expect("store");
    repo.store(&completed).await.expect("store");
    repo.store(&unrelated).await.expect("store");

    let count = repo.count_open_for_user(user).await.expect("count");
    assert_eq!(count, 1);
}

// ============================================================================
// Audit log repository contract
// ============================================================================

#[rstest]
#[tokio::test]
async fn append_then_read_newest_first(log_repo: InMemoryTaskLogRepository) {
    let task_id = TaskId::new();
    let base = Utc::now();
    let first = log_entry_at(task_id, base - Duration::minutes(10), "first");
    let second = log_entry_at(task_id, base, "second");
    log_repo.append(&first).await.expect("append first");
    log_repo.append(&second).await.expect("append second");

    let entries = log_repo.for_task(task_id).await.expect("for_task");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].comment(), Some("second"));
    assert_eq!(entries[1].comment(), Some("first"));
}

#[rstest]
#[tokio::test]
async fn append_rejects_duplicate_entry_id(log_repo: InMemoryTaskLogRepository) {
    let entry = log_entry_at(TaskId::new(), Utc::now(), "once");
    log_repo.append(&entry).await.expect("first append");

    let result = log_repo.append(&entry).await;
    assert!(matches!(
        result,
        Err(TaskLogRepositoryError::DuplicateEntry(id)) if id == entry.id()
    ));
}

#[rstest]
#[tokio::test]
async fn for_task_scopes_to_one_task(log_repo: InMemoryTaskLogRepository) {
    let task_a = TaskId::new();
    let task_b = TaskId::new();
    log_repo
        .append(&log_entry_at(task_a, Utc::now(), "a"))
        .await
        .expect("append");
    log_repo
        .append(&log_entry_at(task_b, Utc::now(), "b"))
        .await
        .expect("append");

    let entries = log_repo.for_task(task_a).await.expect("for_task");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].comment(), Some("a"));
}

#[rstest]
#[tokio::test]
async fn for_task_unknown_is_empty(log_repo: InMemoryTaskLogRepository) {
    let entries = log_repo.for_task(TaskId::new()).await.expect("for_task");
    assert!(entries.is_empty());
}
