//! Application services for account administration.

mod directory;


pub use directory::{
    CreateUserRequest, UpdateUserRequest, UserDirectoryError, UserDirectoryResult,
    UserDirectoryService, UserProfile, UserTaskStats,
};
