//! End-to-end lifecycle flows over the in-memory adapters.
//!
//! Drives the services the way a transport layer would: an admin seeds
//! the directory and opens a task, the assignee works it to completion,
//! and the audit trail and analytics reflect every step.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use std::sync::Arc;
use taskdesk::access::Actor;
use taskdesk::task::{
    adapters::{
        logging::{LoggingCalendarScheduler, LoggingEmailNotifier},
        memory::{InMemoryTaskLogRepository, InMemoryTaskRepository},
    },
    domain::TaskStatus,
    ports::TaskFilter,
    services::{
        CreateTaskRequest, TaskAnalyticsService, TaskLifecycleService, TaskQueryService,
    },
};
use taskdesk::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{CredentialHash, OrgDomain, Role},
    services::{CreateUserRequest, UserDirectoryError, UserDirectoryService, UserProfile},
};

struct App {
    directory: UserDirectoryService<InMemoryUserRepository, InMemoryTaskRepository, DefaultClock>,
    lifecycle: TaskLifecycleService<
        InMemoryTaskRepository,
        InMemoryTaskLogRepository,
        InMemoryUserRepository,
        LoggingEmailNotifier,
        LoggingCalendarScheduler,
        DefaultClock,
    >,
    queries: TaskQueryService<
        InMemoryTaskRepository,
        InMemoryTaskLogRepository,
        InMemoryUserRepository,
    >,
    analytics: TaskAnalyticsService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>,
    users: Arc<InMemoryUserRepository>,
}

fn app() -> App {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let logs = Arc::new(InMemoryTaskLogRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(DefaultClock);
    let org = OrgDomain::new("example.com").expect("valid domain");

    App {
        directory: UserDirectoryService::new(
            Arc::clone(&users),
            Arc::clone(&tasks),
            Arc::clone(&clock),
            org,
        ),
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&logs),
            Arc::clone(&users),
            Arc::new(LoggingEmailNotifier),
            Arc::new(LoggingCalendarScheduler),
            Arc::clone(&clock),
        ),
        queries: TaskQueryService::new(Arc::clone(&tasks), Arc::clone(&logs), Arc::clone(&users)),
        analytics: TaskAnalyticsService::new(tasks, Arc::clone(&users), clock),
        users,
    }
}

fn actor_for(profile: &UserProfile, role: Role) -> Actor {
    Actor::new(
        profile.id,
        role,
        profile.name.clone(),
        profile.email.clone(),
    )
}

/// The first admin is seeded outside the admin-gated service path, the
/// way a deployment bootstrap would.
async fn seed_admin(app: &App) -> Actor {
    use taskdesk::user::domain::{EmailAddress, User, UserSpec};
    use taskdesk::user::ports::UserRepository as _;

    let org = OrgDomain::new("example.com").expect("valid domain");
    let admin = User::create(
        UserSpec {
            name: "Ada Admin".to_owned(),
            email: EmailAddress::parse("ada@example.com", &org).expect("valid email"),
            role: Role::Admin,
            credential_hash: CredentialHash::new("hashed").expect("non-empty"),
        },
        &DefaultClock,
    )
    .expect("valid user");
    app.users.store(&admin).await.expect("store admin");
    Actor::from_user(&admin)
}

#[tokio::test]
async fn full_task_lifecycle_with_audit_trail() {
    let app = app();
    let admin = seed_admin(&app).await;

    // Admin provisions the assignee.
    let bea = app
        .directory
        .create_user(
            &admin,
            CreateUserRequest::new(
                "Bea Employee",
                "bea@example.com",
                Role::Employee,
                CredentialHash::new("hashed").expect("non-empty"),
            ),
        )
        .await
        .expect("create employee");
    let bea_actor = actor_for(&bea, Role::Employee);

    // Admin opens a task for Bea.
    let task = app
        .lifecycle
        .create_task(
            &admin,
            CreateTaskRequest::new(
                "Quarterly report",
                "Compile the Q3 figures",
                bea.id,
                Utc::now() + Duration::days(7),
            ),
        )
        .await
        .expect("create task");
    assert_eq!(task.status(), TaskStatus::NotStarted);

    // Bea picks it up, asks for feedback, and finishes it.
    app.lifecycle
        .update_status(
            &bea_actor,
            task.id(),
            TaskStatus::InProgress,
            Some("picking this up".to_owned()),
        )
        .await
        .expect("start");
    app.lifecycle
        .add_comment(&bea_actor, task.id(), "figures for March look off")
        .await
        .expect("comment");
    app.lifecycle
        .update_status(&bea_actor, task.id(), TaskStatus::NeedsFeedback, None)
        .await
        .expect("ask for feedback");
    let completed = app
        .lifecycle
        .update_status(&bea_actor, task.id(), TaskStatus::Completed, None)
        .await
        .expect("complete");
    assert!(completed.completed_at().is_some());

    // The detail view shows the whole history, newest first.
    let detail = app
        .queries
        .task_detail(&admin, task.id())
        .await
        .expect("detail");
    assert_eq!(detail.history.len(), 5);
    assert_eq!(detail.history[0].entry.new_status(), TaskStatus::Completed);
    assert_eq!(
        detail.history[0].entry.previous_status(),
        Some(TaskStatus::NeedsFeedback)
    );
    assert!(detail.history[2].entry.is_comment_only());
    assert_eq!(detail.history[4].entry.comment(), Some("Task created"));
    assert_eq!(
        detail
            .task
            .assignee
            .as_ref()
            .map(|identity| identity.name.as_str()),
        Some("Bea Employee")
    );

    // Bea sees the task in her scoped listing.
    let mine = app
        .queries
        .list_tasks(&bea_actor, TaskFilter::default())
        .await
        .expect("list");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].task.status(), TaskStatus::Completed);

    // Analytics reflect the completed task.
    let overview = app.analytics.overview(&admin).await.expect("overview");
    assert_eq!(overview.total, 1);
    assert_eq!(overview.by_status.get(&TaskStatus::Completed), Some(&1));
    assert_eq!(overview.overdue, 0);
}

#[tokio::test]
async fn deactivation_waits_for_open_work() {
    let app = app();
    let admin = seed_admin(&app).await;

    let bea = app
        .directory
        .create_user(
            &admin,
            CreateUserRequest::new(
                "Bea Employee",
                "bea@example.com",
                Role::Employee,
                CredentialHash::new("hashed").expect("non-empty"),
            ),
        )
        .await
        .expect("create employee");
    let bea_actor = actor_for(&bea, Role::Employee);

    let task = app
        .lifecycle
        .create_task(
            &admin,
            CreateTaskRequest::new(
                "Offboarding checklist",
                "Hand over open accounts",
                bea.id,
                Utc::now() + Duration::days(3),
            ),
        )
        .await
        .expect("create task");

    // Blocked while the task is open.
    let blocked = app.directory.deactivate_user(&admin, bea.id).await;
    assert!(matches!(
        blocked,
        Err(UserDirectoryError::HasOpenTasks { open_tasks: 1, .. })
    ));

    // Completing the task clears the gate.
    app.lifecycle
        .update_status(&bea_actor, task.id(), TaskStatus::Completed, None)
        .await
        .expect("complete");
    let profile = app
        .directory
        .deactivate_user(&admin, bea.id)
        .await
        .expect("deactivate");
    assert!(!profile.is_active);

    // History written before deactivation keeps its author.
    let timeline = app
        .queries
        .timeline(&admin, task.id())
        .await
        .expect("timeline");
    assert_eq!(
        timeline[0]
            .actor
            .as_ref()
            .map(|identity| identity.name.as_str()),
        Some("Bea Employee")
    );
}

#[tokio::test]
async fn bulk_completion_by_admin_closes_out_a_sprint() {
    let app = app();
    let admin = seed_admin(&app).await;

    let bea = app
        .directory
        .create_user(
            &admin,
            CreateUserRequest::new(
                "Bea Employee",
                "bea@example.com",
                Role::Employee,
                CredentialHash::new("hashed").expect("non-empty"),
            ),
        )
        .await
        .expect("create employee");

    let mut ids = Vec::new();
    for n in 1..=3 {
        let task = app
            .lifecycle
            .create_task(
                &admin,
                CreateTaskRequest::new(
                    format!("Sprint item {n}"),
                    "Carry-over work",
                    bea.id,
                    Utc::now() + Duration::days(n),
                ),
            )
            .await
            .expect("create task");
        ids.push(task.id());
    }

    let outcome = app
        .lifecycle
        .bulk_update_status(&admin, &ids, TaskStatus::Completed, None)
        .await
        .expect("bulk update");
    assert_eq!(outcome.updated.len(), 3);
    assert!(outcome.missing.is_empty());

    let overview = app.analytics.overview(&admin).await.expect("overview");
    assert_eq!(overview.by_status.get(&TaskStatus::Completed), Some(&3));

    // Every task got a transition entry with the default bulk comment.
    for id in ids {
        let timeline = app.queries.timeline(&admin, id).await.expect("timeline");
        assert_eq!(
            timeline[0].entry.comment(),
            Some("Bulk status update to Completed")
        );
    }
}
