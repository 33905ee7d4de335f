//! In-memory adapters for task persistence.

mod log;
mod task;

pub use log::InMemoryTaskLogRepository;
pub use task::InMemoryTaskRepository;
