//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain invariants, audit log entries,
//! and the in-memory adapter contract.

mod adapters_tests;
