//! Persistence adapter layer.
//!
//! # Responsibility
//! - Define the load/save contract the task store depends on.
//! - Keep payload encoding and SQL details behind that contract.
//!
//! # Invariants
//! - Load paths never fail to the caller; unreadable state recovers to an
//!   empty list.
//! - Save paths overwrite the single payload key with the full task list.

pub mod task_storage;
