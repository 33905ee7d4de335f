//! Directory service for account administration and profile reads.

use crate::access::{self, Actor};
use crate::task::domain::TaskStatus;
use crate::task::ports::{TaskFilter, TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{
        CredentialHash, EmailAddress, OrgDomain, Role, User, UserDomainError, UserId, UserSpec,
    },
    ports::{UserRepository, UserRepositoryError, UserSearch},
};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    role: Role,
    credential_hash: CredentialHash,
}

impl CreateUserRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        credential_hash: CredentialHash,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            credential_hash,
        }
    }
}

/// Partial update to an existing account.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address, re-validated against the organization domain.
    pub email: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New activation flag. Deactivation is subject to the same
    /// open-task guard as [`UserDirectoryService::deactivate_user`].
    pub is_active: Option<bool>,
}

/// Account profile exposed to callers; carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Organizational email address.
    pub email: EmailAddress,
    /// Access role.
    pub role: Role,
    /// Whether the account can act.
    pub is_active: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().clone(),
            role: user.role(),
            is_active: user.is_active(),
        }
    }
}

/// Task involvement counts for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTaskStats {
    /// Account identifier.
    pub id: UserId,
    /// Every task the user created or is assigned to.
    pub total: usize,
    /// Counts by lifecycle status over the same scope.
    pub by_status: BTreeMap<TaskStatus, usize>,
    /// Non-completed tasks the user created or is assigned to.
    pub open_tasks: u64,
    /// Tasks assigned to the user that are past due and not completed.
    pub overdue: usize,
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// The account does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// An account already uses this email address.
    #[error("email address already in use")]
    EmailTaken,

    /// The operation requires administrative rights.
    #[error("user {0} lacks administrator rights")]
    AdminRequired(UserId),

    /// Deactivation is blocked while the user holds open tasks.
    #[error("user {id} still has {open_tasks} open task(s)")]
    HasOpenTasks {
        /// Target account.
        id: UserId,
        /// Open task count blocking the deactivation.
        open_tasks: u64,
    },

    /// User store operation failed.
    #[error(transparent)]
    UserStore(#[from] UserRepositoryError),

    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),
}

/// Result type for directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Account administration and profile reads.
///
/// Every mutation is admin-only. Deactivation replaces deletion and is
/// refused while the target still participates in open tasks.
#[derive(Clone)]
pub struct UserDirectoryService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    tasks: Arc<T>,
    clock: Arc<C>,
    org_domain: OrgDomain,
}

impl<U, T, C> UserDirectoryService<U, T, C>
where
    U: UserRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service bound to an organization domain.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, clock: Arc<C>, org_domain: OrgDomain) -> Self {
        Self {
            users,
            tasks,
            clock,
            org_domain,
        }
    }

    /// Returns the organization domain accounts must belong to.
    #[must_use]
    pub const fn org_domain(&self) -> &OrgDomain {
        &self.org_domain
    }

    /// Creates an account. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AdminRequired`] for non-admin actors,
    /// [`UserDirectoryError::Domain`] when validation fails (including an
    /// email outside the organization domain), or
    /// [`UserDirectoryError::EmailTaken`] when the address is in use.
    pub async fn create_user(
        &self,
        actor: &Actor,
        request: CreateUserRequest,
    ) -> UserDirectoryResult<UserProfile> {
        self.require_admin(actor)?;
        let email = EmailAddress::parse(&request.email, &self.org_domain)?;
        let user = User::create(
            UserSpec {
                name: request.name,
                email,
                role: request.role,
                credential_hash: request.credential_hash,
            },
            &*self.clock,
        )?;
        match self.users.store(&user).await {
            Ok(()) => Ok(UserProfile::from(&user)),
            Err(UserRepositoryError::DuplicateEmail(_)) => Err(UserDirectoryError::EmailTaken),
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a partial update to an account. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::UserNotFound`] when the account does
    /// not exist, [`UserDirectoryError::Domain`] when a new value fails
    /// validation, [`UserDirectoryError::EmailTaken`] when the new
    /// address is in use, or [`UserDirectoryError::HasOpenTasks`] when
    /// deactivating a user with open work.
    pub async fn update_user(
        &self,
        actor: &Actor,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> UserDirectoryResult<UserProfile> {
        self.require_admin(actor)?;
        let mut user = self.find_user(user_id).await?;

        if let Some(name) = request.name {
            user.rename(&name, &*self.clock)?;
        }
        if let Some(email) = request.email {
            let parsed = EmailAddress::parse(&email, &self.org_domain)?;
            user.change_email(parsed, &*self.clock);
        }
        if let Some(role) = request.role {
            user.set_role(role, &*self.clock);
        }
        match request.is_active {
            Some(true) => user.activate(&*self.clock),
            Some(false) => {
                self.guard_open_tasks(user_id).await?;
                user.deactivate(&*self.clock);
            }
            None => {}
        }

        match self.users.update(&user).await {
            Ok(()) => Ok(UserProfile::from(&user)),
            Err(UserRepositoryError::DuplicateEmail(_)) => Err(UserDirectoryError::EmailTaken),
            Err(err) => Err(err.into()),
        }
    }

    /// Deactivates an account. Admin only.
    ///
    /// Accounts are never deleted so audit history keeps its authors.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::HasOpenTasks`] while the target
    /// still creates or is assigned to non-completed tasks, or
    /// [`UserDirectoryError::UserNotFound`] when the account does not
    /// exist.
    pub async fn deactivate_user(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> UserDirectoryResult<UserProfile> {
        self.require_admin(actor)?;
        let mut user = self.find_user(user_id).await?;
        self.guard_open_tasks(user_id).await?;
        user.deactivate(&*self.clock);
        self.users.update(&user).await?;
        Ok(UserProfile::from(&user))
    }

    /// Reactivates a previously deactivated account. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::UserNotFound`] when the account does
    /// not exist.
    pub async fn activate_user(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> UserDirectoryResult<UserProfile> {
        self.require_admin(actor)?;
        let mut user = self.find_user(user_id).await?;
        user.activate(&*self.clock);
        self.users.update(&user).await?;
        Ok(UserProfile::from(&user))
    }

    /// Fetches one account's profile. Admin or the account itself.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AdminRequired`] when the actor is
    /// neither admin nor the account itself, or
    /// [`UserDirectoryError::UserNotFound`] when the account does not
    /// exist.
    pub async fn get_user(&self, actor: &Actor, user_id: UserId) -> UserDirectoryResult<UserProfile> {
        if !access::is_owner_or_admin(actor, user_id) {
            return Err(UserDirectoryError::AdminRequired(actor.id()));
        }
        let user = self.find_user(user_id).await?;
        Ok(UserProfile::from(&user))
    }

    /// Lists every account, newest first. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AdminRequired`] for non-admin
    /// actors, or a store error when the lookup fails.
    pub async fn list_users(&self, actor: &Actor) -> UserDirectoryResult<Vec<UserProfile>> {
        self.require_admin(actor)?;
        let users = self.users.list().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Searches accounts by name/email text, role, and active flag.
    /// Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AdminRequired`] for non-admin
    /// actors, or a store error when the lookup fails.
    pub async fn search_users(
        &self,
        actor: &Actor,
        search: UserSearch,
    ) -> UserDirectoryResult<Vec<UserProfile>> {
        self.require_admin(actor)?;
        let users = self.users.search(&search).await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Returns task involvement counts for an account. Admin or the
    /// account itself.
    ///
    /// Status counts cover tasks the user created or is assigned to;
    /// the overdue count covers only tasks assigned to the user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AdminRequired`] when the actor is
    /// neither admin nor the account itself, or
    /// [`UserDirectoryError::UserNotFound`] when the account does not
    /// exist.
    pub async fn user_stats(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> UserDirectoryResult<UserTaskStats> {
        if !access::is_owner_or_admin(actor, user_id) {
            return Err(UserDirectoryError::AdminRequired(actor.id()));
        }
        self.find_user(user_id).await?;

        let filter = TaskFilter::default().with_participant(user_id);
        let tasks = self.tasks.list(&filter).await?;
        let now = self.clock.utc();

        let mut by_status: BTreeMap<TaskStatus, usize> = BTreeMap::new();
        let mut open_tasks: u64 = 0;
        let mut overdue = 0;
        for task in &tasks {
            *by_status.entry(task.status()).or_default() += 1;
            if task.status() != TaskStatus::Completed {
                open_tasks += 1;
            }
            if task.assignee_id() == user_id && task.is_overdue(now) {
                overdue += 1;
            }
        }

        Ok(UserTaskStats {
            id: user_id,
            total: tasks.len(),
            by_status,
            open_tasks,
            overdue,
        })
    }

    async fn guard_open_tasks(&self, user_id: UserId) -> UserDirectoryResult<()> {
        let open_tasks = self.tasks.count_open_for_user(user_id).await?;
        if open_tasks > 0 {
            return Err(UserDirectoryError::HasOpenTasks {
                id: user_id,
                open_tasks,
            });
        }
        Ok(())
    }

    fn require_admin(&self, actor: &Actor) -> UserDirectoryResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(UserDirectoryError::AdminRequired(actor.id()))
        }
    }

    async fn find_user(&self, user_id: UserId) -> UserDirectoryResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserDirectoryError::UserNotFound(user_id))
    }
}
