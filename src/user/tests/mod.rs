//! Unit tests for the user module.
//!
//! Tests are organised by concern: domain invariants and the in-memory
//! adapter contract.

mod adapters_tests;
