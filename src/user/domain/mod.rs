//! Domain model for the user directory.
//!
//! Accounts carry identity, an organizational email address, a role, and
//! an active flag. All infrastructure concerns stay outside the domain
//! boundary.

mod email;
mod error;
mod ids;
mod user;

pub use email::{EmailAddress, OrgDomain};
pub use error::{ParseRoleError, UserDomainError};
pub use ids::UserId;
pub use user::{CredentialHash, PersistedUserData, Role, User, UserIdentity, UserSpec};
