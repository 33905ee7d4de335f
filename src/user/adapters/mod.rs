//! Adapter implementations of the user directory ports.

pub mod memory;
pub mod postgres;
