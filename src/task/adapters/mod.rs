//! Adapter implementations of the task ports.

pub mod logging;
pub mod memory;
pub mod postgres;
