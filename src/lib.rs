//! Taskdesk: task assignment and tracking for a single organization.
//!
//! This crate provides the core functionality for assigning tasks to
//! employees, tracking their lifecycle through an append-only audit log,
//! and reporting aggregate statistics to administrators.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, notifiers, etc.)
//!
//! # Modules
//!
//! - [`user`]: Accounts, roles, and the organizational email policy
//! - [`task`]: Task lifecycle, audit log, and reporting
//! - [`access`]: Role-based authorization predicates
//! - [`api`]: Transport-facing envelope and error taxonomy

pub mod access;
pub mod api;
pub mod task;
pub mod user;
