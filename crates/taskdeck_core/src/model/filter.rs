//! View selectors and list counters.

use crate::model::task::{Category, Task};

/// A named view selector over the task list.
///
/// Selectors only hide tasks; they never reorder the underlying list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// No filtering.
    #[default]
    All,
    /// Only tasks with `completed == true`.
    Completed,
    /// Only tasks of one category.
    Category(Category),
}

impl Filter {
    /// Parses a filter name.
    ///
    /// Recognizes `all`, `completed` and the category labels. Unrecognized
    /// names fall back to `All`; a stale selector must never break the view.
    pub fn parse(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "completed" => Self::Completed,
            other => Category::parse(other).map_or(Self::All, Self::Category),
        }
    }

    /// Returns the wire name for this selector.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Category(category) => category.as_label(),
        }
    }

    /// Returns whether `task` is visible under this selector.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Category(category) => task.category == category,
        }
    }
}

/// Aggregate counters over the current task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    /// Computes counters from `tasks`; `pending = total - completed` holds
    /// by construction.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}
