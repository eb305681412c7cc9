//! In-memory task list with write-through persistence.
//!
//! # Responsibility
//! - Hold the ordered task list as the single source of truth.
//! - Mirror the full list to storage after each mutation.
//! - Notify the injected observer so a view layer can re-render.
//!
//! # Invariants
//! - Issued ids never repeat within a store lifetime, including ids loaded
//!   from a previous run.
//! - Insertion order is preserved; filtering never reorders.
//! - A failed save never rolls back or corrupts the in-memory list.

use crate::model::filter::{Filter, Stats};
use crate::model::task::{Category, Task, TaskId, TaskValidationError};
use crate::storage::task_storage::TaskStorage;
use chrono::Utc;
use log::{error, info};

/// Change notifications delivered to the injected observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(TaskId),
    TaskToggled(TaskId),
    TaskDeleted(TaskId),
    FilterChanged(Filter),
    /// A mutation was applied in memory but could not be persisted.
    PersistenceFailed(String),
}

/// Callback a view layer registers to react to store changes.
pub type ChangeObserver = Box<dyn Fn(&StoreEvent)>;

/// Ordered task list with write-through persistence.
///
/// Constructed over any `TaskStorage`, so tests and embedders can run it
/// without a UI surface or a real database.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    filter: Filter,
    next_id_floor: TaskId,
    storage: S,
    observer: Option<ChangeObserver>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Loads persisted tasks (empty on absence or corruption) and seeds the
    /// id generator past every persisted id.
    pub fn open(storage: S) -> Self {
        let tasks = storage.load();
        let next_id_floor = tasks.iter().map(|task| task.id).max().map_or(0, |id| id + 1);
        info!(
            "event=store_open module=store status=ok count={}",
            tasks.len()
        );

        Self {
            tasks,
            filter: Filter::All,
            next_id_floor,
            storage,
            observer: None,
        }
    }

    /// Registers the change observer used for view notifications.
    pub fn set_observer(&mut self, observer: ChangeObserver) {
        self.observer = Some(observer);
    }

    /// Appends a new pending task at the end of the list and returns it.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` trims to nothing; the
    ///   list is left unchanged.
    pub fn add(&mut self, text: &str, category: Category) -> Result<Task, TaskValidationError> {
        if text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        let id = self.next_task_id();
        let task = Task::new(id, text, category, Utc::now())?;
        self.tasks.push(task.clone());
        info!(
            "event=task_add module=store status=ok id={id} category={} total={}",
            task.category.as_label(),
            self.tasks.len()
        );

        self.persist_and_notify(StoreEvent::TaskAdded(id));
        Ok(task)
    }

    /// Appends a task after parsing a category wire label.
    ///
    /// # Errors
    /// - `TaskValidationError::UnknownCategory` for unrecognized labels.
    /// - `TaskValidationError::EmptyText` as in [`TaskStore::add`].
    pub fn add_labeled(
        &mut self,
        text: &str,
        category_label: &str,
    ) -> Result<Task, TaskValidationError> {
        let category = Category::parse(category_label)
            .ok_or_else(|| TaskValidationError::UnknownCategory(category_label.to_string()))?;
        self.add(text, category)
    }

    /// Flips completion for `id` and returns the updated task.
    ///
    /// Unknown ids are a silent no-op returning `None`; they most plausibly
    /// come from a stale view.
    pub fn toggle(&mut self, id: TaskId) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let updated = task.clone();
        info!(
            "event=task_toggle module=store status=ok id={id} completed={}",
            updated.completed
        );

        self.persist_and_notify(StoreEvent::TaskToggled(id));
        Some(updated)
    }

    /// Removes `id` permanently. Unknown ids are a silent no-op.
    ///
    /// Callers presenting a UI are expected to confirm with the user before
    /// invoking this; the store itself never asks.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        info!(
            "event=task_delete module=store status=ok id={id} total={}",
            self.tasks.len()
        );

        self.persist_and_notify(StoreEvent::TaskDeleted(id));
        true
    }

    /// Sets the active view selector.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.notify(&StoreEvent::FilterChanged(filter));
    }

    /// Sets the active view selector from a name.
    ///
    /// Unrecognized names fall back to `Filter::All` rather than failing.
    pub fn set_filter_by_name(&mut self, name: &str) {
        self.set_filter(Filter::parse(name));
    }

    /// Returns the active view selector.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Tasks visible under the active selector, in insertion order.
    ///
    /// Pure query over borrowed state; nothing is cloned or reordered.
    pub fn filtered(&self) -> impl Iterator<Item = &Task> {
        self.filtered_by(self.filter)
    }

    /// Tasks visible under an explicit selector, in insertion order.
    pub fn filtered_by(&self, filter: Filter) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Counters over the current list.
    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn next_task_id(&mut self) -> TaskId {
        // Epoch milliseconds keep ids roughly chronological; the floor keeps
        // them unique across same-tick adds and reloaded stores.
        let id = self.next_id_floor.max(Utc::now().timestamp_millis());
        self.next_id_floor = id + 1;
        id
    }

    fn persist_and_notify(&self, event: StoreEvent) {
        if let Err(err) = self.storage.save(&self.tasks) {
            error!("event=tasks_save module=store status=error error={err}");
            self.notify(&StoreEvent::PersistenceFailed(err.to_string()));
        }
        self.notify(&event);
    }

    fn notify(&self, event: &StoreEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}
