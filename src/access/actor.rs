//! Authenticated request actor.

use crate::user::domain::{EmailAddress, Role, User, UserId};

/// The authenticated user performing a request.
///
/// Built at the authentication boundary, after token verification has
/// already rejected missing, expired, and deactivated accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: UserId,
    role: Role,
    name: String,
    email: EmailAddress,
}

impl Actor {
    /// Creates an actor from already-authenticated parts.
    #[must_use]
    pub const fn new(id: UserId, role: Role, name: String, email: EmailAddress) -> Self {
        Self {
            id,
            role,
            name,
            email,
        }
    }

    /// Creates an actor view of a stored account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            role: user.role(),
            name: user.name().to_owned(),
            email: user.email().clone(),
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns whether the actor carries administrative rights.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
