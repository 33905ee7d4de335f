//! Repository port for account persistence and lookup.

use crate::user::domain::{EmailAddress, Role, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// Search criteria for account listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    /// Case-insensitive substring matched against name and email.
    pub text: Option<String>,
    /// Restrict to a single role.
    pub role: Option<Role>,
    /// Restrict by active flag.
    pub active: Option<bool>,
}

/// Account persistence contract.
///
/// Listings are ordered newest-first by creation timestamp.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// already exists or [`UserRepositoryError::DuplicateEmail`] when the
    /// address is already taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the account does not
    /// exist and [`UserRepositoryError::DuplicateEmail`] when the new
    /// address collides with another account.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds an account by normalized email address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Returns the accounts matching any of the given identifiers.
    ///
    /// Missing identifiers are silently omitted from the result.
    async fn find_by_ids(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>>;

    /// Returns every account, newest-first.
    async fn list(&self) -> UserRepositoryResult<Vec<User>>;

    /// Returns the accounts matching the search criteria, newest-first.
    async fn search(&self, search: &UserSearch) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// An account with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// An account with the same email address already exists.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The account was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
