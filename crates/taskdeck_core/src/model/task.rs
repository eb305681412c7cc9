//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store and storage layers.
//! - Validate user-supplied text and category labels.
//!
//! # Invariants
//! - `text` is stored trimmed and is never empty.
//! - `created_at` is fixed at creation and never mutated afterwards.
//! - `category` is a closed set; unknown labels are rejected at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable integer identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Closed category set a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Private errands and reminders.
    Personal,
    /// School or class work.
    Class,
    /// Work-related items.
    Business,
}

impl Category {
    /// All recognized categories, in display order.
    pub const ALL: [Self; 3] = [Self::Personal, Self::Class, Self::Business];

    /// Returns the wire label used in persisted payloads and filter names.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Class => "class",
            Self::Business => "business",
        }
    }

    /// Parses a wire label. Returns `None` for unrecognized labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "personal" => Some(Self::Personal),
            "class" => Some(Self::Class),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

/// Validation failures for task creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text was empty or whitespace-only after trimming.
    EmptyText,
    /// Category label is not part of the recognized set.
    UnknownCategory(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::UnknownCategory(label) => write!(f, "unknown task category `{label}`"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within a store for the process lifetime.
    pub id: TaskId,
    /// User-supplied text, stored trimmed.
    pub text: String,
    pub category: Category,
    /// Completion flag, flipped any number of times by toggling.
    pub completed: bool,
    /// Serialized as `createdAt` (ISO-8601) to match the persisted payload.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task, trimming the provided text.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` trims to nothing.
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text: trimmed.to_string(),
            category,
            completed: false,
            created_at,
        })
    }

    /// Checks model invariants on an already-built task.
    ///
    /// Used by storage read paths to reject invalid persisted state instead
    /// of masking it.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }
}
