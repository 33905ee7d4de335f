//! Organizational email address value objects.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The email domain every account must belong to.
///
/// Supplied once at process start and shared by every component that
/// validates addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrgDomain(String);

impl OrgDomain {
    /// Creates a validated organizational domain (e.g. `example.com`).
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidOrgDomain`] when the value is
    /// empty, contains whitespace or `@`, or lacks a dot.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let is_valid = !normalized.is_empty()
            && normalized.contains('.')
            && !normalized.contains('@')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidOrgDomain(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the domain as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized email address, guaranteed to sit in the organizational
/// domain at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes an address, enforcing the organizational
    /// domain.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] for structurally invalid
    /// input and [`UserDomainError::WrongEmailDomain`] when the domain
    /// part differs from `org`.
    pub fn parse(value: impl Into<String>, org: &OrgDomain) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(UserDomainError::InvalidEmail(raw));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(UserDomainError::InvalidEmail(raw));
        }
        if domain != org.as_str() {
            return Err(UserDomainError::WrongEmailDomain {
                email: raw,
                domain: org.as_str().to_owned(),
            });
        }

        Ok(Self(normalized))
    }

    /// Wraps a value that was validated before persistence.
    ///
    /// Only for rehydrating stored rows; new input goes through
    /// [`EmailAddress::parse`].
    #[must_use]
    pub const fn from_trusted(value: String) -> Self {
        Self(value)
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
