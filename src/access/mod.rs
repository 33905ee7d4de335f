//! Authorization gate.
//!
//! Per-request policy checks consulted before lifecycle operations
//! execute: admin, owner-or-assignee, and owner-or-admin predicates over
//! an authenticated [`Actor`].

mod actor;
mod policy;

pub use actor::Actor;
pub use policy::{can_access_task, can_update_status, is_owner_or_admin};
