//! Port contracts for the user directory.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult, UserSearch};
