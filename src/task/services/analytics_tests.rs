//! Tests for the analytics service.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use super::{TaskAnalyticsError, TaskAnalyticsService};
use crate::access::Actor;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{CredentialHash, EmailAddress, OrgDomain, Role, User, UserId, UserSpec},
    ports::UserRepository,
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use std::sync::Arc;

struct Harness {
    service: TaskAnalyticsService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>,
    tasks: Arc<InMemoryTaskRepository>,
    users: Arc<InMemoryUserRepository>,
}

fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let service = TaskAnalyticsService::new(
        Arc::clone(&tasks),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        tasks,
        users,
    }
}

async fn seed_user(harness: &Harness, name: &str, local: &str, role: Role) -> User {
    let org = OrgDomain::new("example.com").expect("valid domain");
    let user = User::create(
        UserSpec {
            name: name.to_owned(),
            email: EmailAddress::parse(format!("{local}@example.com"), &org)
                .expect("valid email"),
            role,
            credential_hash: CredentialHash::new("hashed").expect("non-empty"),
        },
        &DefaultClock,
    )
    .expect("valid user");
    harness.users.store(&user).await.expect("store user");
    user
}

/// Stores a fully specified task row, bypassing creation validation so
/// overdue and completed states can be set up directly.
async fn seed_task(
    harness: &Harness,
    assignee_id: UserId,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
) {
    let now = Utc::now();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Seeded".to_owned(),
        description: "Seeded description".to_owned(),
        creator_id: UserId::new(),
        assignee_id,
        due_date,
        status,
        priority,
        note: None,
        calendar_event_refs: None,
        completed_at: (status == TaskStatus::Completed).then_some(now),
        created_at: now,
        updated_at: now,
    });
    harness.tasks.store(&task).await.expect("store task");
}

#[tokio::test]
async fn overview_is_admin_only() {
    let harness = harness();
    let bea = seed_user(&harness, "Bea Employee", "bea", Role::Employee).await;

    let result = harness.service.overview(&Actor::from_user(&bea)).await;
    assert!(matches!(result, Err(TaskAnalyticsError::AdminRequired(_))));
}

#[tokio::test]
async fn overview_counts_statuses_priorities_and_overdue() {
    let harness = harness();
    let admin = seed_user(&harness, "Ada Admin", "ada", Role::Admin).await;
    let bea = seed_user(&harness, "Bea Employee", "bea", Role::Employee).await;
    let future = Utc::now() + Duration::days(7);
    let past = Utc::now() - Duration::days(1);

    seed_task(&harness, bea.id(), TaskStatus::NotStarted, TaskPriority::High, future).await;
    seed_task(&harness, bea.id(), TaskStatus::InProgress, TaskPriority::Medium, past).await;
    seed_task(&harness, bea.id(), TaskStatus::Completed, TaskPriority::Medium, past).await;

    let overview = harness
        .service
        .overview(&Actor::from_user(&admin))
        .await
        .expect("overview");

    assert_eq!(overview.total, 3);
    assert_eq!(overview.by_status.get(&TaskStatus::NotStarted), Some(&1));
    assert_eq!(overview.by_status.get(&TaskStatus::InProgress), Some(&1));
    assert_eq!(overview.by_status.get(&TaskStatus::Completed), Some(&1));
    assert_eq!(overview.by_priority.get(&TaskPriority::High), Some(&1));
    assert_eq!(overview.by_priority.get(&TaskPriority::Medium), Some(&2));
    // A completed task past its due date is not overdue.
    assert_eq!(overview.overdue, 1);
}

#[tokio::test]
async fn overview_groups_workload_per_assignee_heaviest_first() {
    let harness = harness();
    let admin = seed_user(&harness, "Ada Admin", "ada", Role::Admin).await;
    let busy = seed_user(&harness, "Busy Person", "busy", Role::Employee).await;
    let light = seed_user(&harness, "Light Load", "light", Role::Employee).await;
    let future = Utc::now() + Duration::days(7);

    seed_task(&harness, busy.id(), TaskStatus::NotStarted, TaskPriority::Medium, future).await;
    seed_task(&harness, busy.id(), TaskStatus::Completed, TaskPriority::Medium, future).await;
    seed_task(&harness, light.id(), TaskStatus::InProgress, TaskPriority::Medium, future).await;

    let overview = harness
        .service
        .overview(&Actor::from_user(&admin))
        .await
        .expect("overview");

    assert_eq!(overview.per_assignee.len(), 2);
    let heaviest = &overview.per_assignee[0];
    assert_eq!(
        heaviest
            .assignee
            .as_ref()
            .map(|identity| identity.name.as_str()),
        Some("Busy Person")
    );
    assert_eq!(heaviest.total, 2);
    assert_eq!(heaviest.open, 1);
    assert_eq!(heaviest.in_progress, 0);
    assert_eq!(heaviest.completed, 1);
    assert_eq!(overview.per_assignee[1].total, 1);
    assert_eq!(overview.per_assignee[1].in_progress, 1);
}

#[tokio::test]
async fn overview_of_empty_store_is_all_zero() {
    let harness = harness();
    let admin = seed_user(&harness, "Ada Admin", "ada", Role::Admin).await;

    let overview = harness
        .service
        .overview(&Actor::from_user(&admin))
        .await
        .expect("overview");

    assert_eq!(overview.total, 0);
    assert!(overview.by_status.is_empty());
    assert!(overview.by_priority.is_empty());
    assert_eq!(overview.overdue, 0);
    assert!(overview.per_assignee.is_empty());
}
