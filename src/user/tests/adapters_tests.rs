//! Unit tests for the in-memory user repository.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{
        CredentialHash, EmailAddress, OrgDomain, PersistedUserData, Role, User, UserId,
    },
    ports::{UserRepository, UserRepositoryError, UserSearch},
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repo() -> InMemoryUserRepository {
    InMemoryUserRepository::new()
}

/// Builds a user with an explicit creation timestamp so ordering
/// assertions are deterministic.
fn user_created_at(name: &str, local: &str, role: Role, created_at: DateTime<Utc>) -> User {
    User::from_persisted(PersistedUserData {
        id: UserId::new(),
        name: name.to_owned(),
        email: EmailAddress::from_trusted(format!("{local}@example.com")),
        role,
        is_active: true,
        credential_hash: CredentialHash::new("hashed").expect("non-empty"),
        created_at,
        updated_at: created_at,
    })
}

#[rstest]
#[tokio::test]
async fn store_then_find_by_id_and_email(repo: InMemoryUserRepository) {
    let user = user_created_at("Bea Employee", "bea", Role::Employee, Utc::now());
    repo.store(&user).await.expect("store");

    let by_id = repo.find_by_id(user.id()).await.expect("find by id");
    assert_eq!(by_id, Some(user.clone()));

    let by_email = repo
        .find_by_email(user.email())
        .await
        .expect("find by email");
    assert_eq!(by_email, Some(user));
}

#[rstest]
#[tokio::test]
async fn store_rejects_duplicate_email(repo: InMemoryUserRepository) {
    let first = user_created_at("Bea Employee", "bea", Role::Employee, Utc::now());
    let second = user_created_at("Bea Imposter", "bea", Role::Employee, Utc::now());
    repo.store(&first).await.expect("store");

    let result = repo.store(&second).await;
    assert!(matches!(result, Err(UserRepositoryError::DuplicateEmail(_))));
}

#[rstest]
#[tokio::test]
async fn update_reindexes_changed_email(repo: InMemoryUserRepository) {
    let org = OrgDomain::new("example.com").expect("valid domain");
    let mut user = user_created_at("Bea Employee", "bea", Role::Employee, Utc::now());
    repo.store(&user).await.expect("store");

    let new_email = EmailAddress::parse("beatrice@example.com", &org).expect("valid email");
    user.change_email(new_email.clone(), &DefaultClock);
    repo.update(&user).await.expect("update");

    let old_email = EmailAddress::from_trusted("bea@example.com".to_owned());
    assert!(
        repo.find_by_email(&old_email)
            .await
            .expect("find")
            .is_none()
    );
    assert!(
        repo.find_by_email(&new_email)
            .await
            .expect("find")
            .is_some()
    );
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_owned_by_another_account(repo: InMemoryUserRepository) {
    let org = OrgDomain::new("example.com").expect("valid domain");
    let first = user_created_at("Bea Employee", "bea", Role::Employee, Utc::now());
    let mut second = user_created_at("Carl Creator", "carl", Role::Employee, Utc::now());
    repo.store(&first).await.expect("store first");
    repo.store(&second).await.expect("store second");

    let taken = EmailAddress::parse("bea@example.com", &org).expect("valid email");
    second.change_email(taken, &DefaultClock);
    let result = repo.update(&second).await;
    assert!(matches!(result, Err(UserRepositoryError::DuplicateEmail(_))));
}

#[rstest]
#[tokio::test]
async fn find_by_ids_omits_missing_accounts(repo: InMemoryUserRepository) {
    let user = user_created_at("Bea Employee", "bea", Role::Employee, Utc::now());
    repo.store(&user).await.expect("store");

    let found = repo
        .find_by_ids(&[user.id(), UserId::new()])
        .await
        .expect("find by ids");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), user.id());
}

#[rstest]
#[tokio::test]
async fn list_orders_newest_first(repo: InMemoryUserRepository) {
    let base = Utc::now();
    let older = user_created_at("Old Timer", "old", Role::Employee, base - Duration::days(1));
    let newer = user_created_at("New Hire", "new", Role::Employee, base);
    repo.store(&older).await.expect("store older");
    repo.store(&newer).await.expect("store newer");

    let listed = repo.list().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name(), "New Hire");
    assert_eq!(listed[1].name(), "Old Timer");
}

#[rstest]
#[tokio::test]
async fn search_combines_text_role_and_active(repo: InMemoryUserRepository) {
    let now = Utc::now();
    let admin = user_created_at("Ada Admin", "ada", Role::Admin, now);
    let employee = user_created_at("Bea Employee", "bea", Role::Employee, now);
    let mut inactive = user_created_at("Iris Inactive", "iris", Role::Employee, now);
    inactive.deactivate(&DefaultClock);
    repo.store(&admin).await.expect("store");
    repo.store(&employee).await.expect("store");
    repo.store(&inactive).await.expect("store");

    let active_employees = repo
        .search(&UserSearch {
            text: None,
            role: Some(Role::Employee),
            active: Some(true),
        })
        .await
        .expect("search");
    assert_eq!(active_employees.len(), 1);
    assert_eq!(active_employees[0].name(), "Bea Employee");

    let by_text = repo
        .search(&UserSearch {
            text: Some("ada@".to_owned()),
            role: None,
            active: None,
        })
        .await
        .expect("search");
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].name(), "Ada Admin");
}
