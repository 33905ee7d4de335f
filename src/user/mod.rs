//! Accounts, roles, and the organizational email policy for Taskdesk.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::User`], [`domain::Role`], [`domain::EmailAddress`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::UserRepository`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryUserRepository`], [`adapters::postgres::PostgresUserRepository`])
//! - **Services**: Admin-only account administration ([`services::UserDirectoryService`])
//!
//! Accounts are never hard-deleted: deactivation preserves the rows that
//! task audit history points at.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
