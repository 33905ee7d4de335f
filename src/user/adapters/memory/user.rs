//! In-memory repository for user directory tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult, UserSearch},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<String, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(user: &User, search: &UserSearch) -> bool {
    if let Some(role) = search.role
        && user.role() != role
    {
        return false;
    }
    if let Some(active) = search.active
        && user.is_active() != active
    {
        return false;
    }
    if let Some(text) = &search.text {
        let needle = text.to_ascii_lowercase();
        let in_name = user.name().to_ascii_lowercase().contains(&needle);
        let in_email = user.email().as_str().contains(&needle);
        if !in_name && !in_email {
            return false;
        }
    }
    true
}

/// Clones matching accounts out of the state, newest-first.
fn collect_sorted(state: &InMemoryUserState, predicate: impl Fn(&User) -> bool) -> Vec<User> {
    let mut users: Vec<User> = state
        .users
        .values()
        .filter(|user| predicate(user))
        .cloned()
        .collect();
    users.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email().as_str()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state
            .email_index
            .insert(user.email().as_str().to_owned(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_user = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .clone();

        if user.email() != old_user.email() {
            if let Some(owner) = state.email_index.get(user.email().as_str())
                && *owner != user.id()
            {
                return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
            }
            state.email_index.remove(old_user.email().as_str());
            state
                .email_index
                .insert(user.email().as_str().to_owned(), user.id());
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .email_index
            .get(email.as_str())
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_sorted(&state, |_| true))
    }

    async fn search(&self, search: &UserSearch) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_sorted(&state, |user| matches_search(user, search)))
    }
}
