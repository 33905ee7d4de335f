//! Task lifecycle, audit log, and reporting for Taskdesk.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Task`], [`domain::TaskStatus`], [`domain::TaskLogEntry`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::TaskRepository`], [`ports::EmailNotifier`], [`ports::CalendarScheduler`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryTaskRepository`], [`adapters::postgres::PostgresTaskRepository`])
//! - **Services**: Workflows pairing each mutation with an audit log append and
//!   fencing off best-effort notification side effects
//!
//! Every task mutation writes exactly one [`domain::TaskLogEntry`]; the
//! entries for a task are its complete, append-only history.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
