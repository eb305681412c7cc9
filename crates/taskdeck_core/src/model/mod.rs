//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record, its category set and view selectors.
//! - Enforce input validity before anything reaches storage.
//!
//! # Invariants
//! - Every task is identified by a stable integer `TaskId`.
//! - Deletion is permanent; there are no tombstones.

pub mod filter;
pub mod task;
