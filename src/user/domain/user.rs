//! User aggregate root and related account types.

use super::{EmailAddress, ParseRoleError, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative rights.
    Admin,
    /// Regular employee.
    Employee,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Opaque credential hash.
///
/// Hashing happens upstream at the authentication boundary; the domain
/// only stores and compares the opaque value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wraps an already-hashed credential.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyCredentialHash`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserDomainError::EmptyCredentialHash);
        }
        Ok(Self(raw))
    }

    /// Returns the hash as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display projection of an account, safe to embed in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Organizational email address.
    pub email: EmailAddress,
}

/// Parameter object for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSpec {
    /// Display name.
    pub name: String,
    /// Validated organizational address.
    pub email: EmailAddress,
    /// Access role.
    pub role: Role,
    /// Opaque credential hash.
    pub credential_hash: CredentialHash,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted account identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted role.
    pub role: Role,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted credential hash.
    pub credential_hash: CredentialHash,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// User aggregate root.
///
/// Accounts are never hard-deleted; deactivation is the only terminal
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    role: Role,
    is_active: bool,
    credential_hash: CredentialHash,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    const NAME_MIN: usize = 2;
    const NAME_MAX: usize = 100;

    /// Creates a new active account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidName`] when the trimmed display
    /// name is outside the 2–100 character range.
    pub fn create(spec: UserSpec, clock: &impl Clock) -> Result<Self, UserDomainError> {
        let name = validate_name(&spec.name)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: UserId::new(),
            name,
            email: spec.email,
            role: spec.role,
            is_active: true,
            credential_hash: spec.credential_hash,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            role: data.role,
            is_active: data.is_active,
            credential_hash: data.credential_hash,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
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

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the credential hash.
    #[must_use]
    pub const fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the display projection of this account.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidName`] when the trimmed name is
    /// outside the accepted length range.
    pub fn rename(&mut self, name: &str, clock: &impl Clock) -> Result<(), UserDomainError> {
        self.name = validate_name(name)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the email address with an already-validated one.
    pub fn change_email(&mut self, email: EmailAddress, clock: &impl Clock) {
        self.email = email;
        self.touch(clock);
    }

    /// Changes the access role.
    pub fn set_role(&mut self, role: Role, clock: &impl Clock) {
        self.role = role;
        self.touch(clock);
    }

    /// Marks the account active.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.is_active = true;
        self.touch(clock);
    }

    /// Marks the account inactive. The row is preserved.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.is_active = false;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims and length-checks a display name.
fn validate_name(value: &str) -> Result<String, UserDomainError> {
    let trimmed = value.trim();
    if trimmed.len() < User::NAME_MIN || trimmed.len() > User::NAME_MAX {
        return Err(UserDomainError::InvalidName {
            min: User::NAME_MIN,
            max: User::NAME_MAX,
        });
    }
    Ok(trimmed.to_owned())
}
