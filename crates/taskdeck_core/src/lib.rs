//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for task-list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{Filter, Stats};
pub use model::task::{Category, Task, TaskId, TaskValidationError};
pub use storage::task_storage::{
    SqliteKvStorage, StorageError, StorageResult, TaskStorage, TASKS_KEY,
};
pub use store::task_store::{ChangeObserver, StoreEvent, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
