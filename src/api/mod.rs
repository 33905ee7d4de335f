//! Transport-facing envelope and error taxonomy.
//!
//! The HTTP server itself lives outside this crate; handlers wrap
//! service results in [`ApiResponse`] and map service errors to
//! [`ApiError`] status codes.

mod error;
mod response;


pub use error::ApiError;
pub use response::ApiResponse;
