//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The email address is not structurally valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The email address does not belong to the organizational domain.
    #[error("email '{email}' is not in the organizational domain '{domain}'")]
    WrongEmailDomain {
        /// Rejected address.
        email: String,
        /// Required organizational domain.
        domain: String,
    },

    /// The organizational domain value is malformed.
    #[error("invalid organizational domain: {0}")]
    InvalidOrgDomain(String),

    /// The display name is empty or outside the accepted length range.
    #[error("display name must be between {min} and {max} characters")]
    InvalidName {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The credential hash is empty.
    #[error("credential hash must not be empty")]
    EmptyCredentialHash,
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
