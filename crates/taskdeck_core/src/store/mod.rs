//! Task store orchestration.
//!
//! # Responsibility
//! - Own the in-memory task list and every mutation path.
//! - Coordinate write-through persistence and observer notification.
//!
//! # Invariants
//! - There is exactly one mutator at a time; operations run to completion.

pub mod task_store;
