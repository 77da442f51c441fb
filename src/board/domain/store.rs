//! Authoritative local task collection for one board.

use super::{Comment, Task, TaskId, TaskStatus};
use std::collections::HashSet;

/// Ordered tasks of the project currently shown on the board.
///
/// The store never holds two tasks with the same identifier. Mutations for
/// identifiers that are not present are ignored, since a task may have been
/// deleted concurrently with the request that targets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Replaces the whole sequence with a fresh snapshot.
    ///
    /// Later duplicates of an identifier are dropped so the first occurrence
    /// keeps its display position.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) {
        let mut seen = HashSet::new();
        let fresh = tasks
            .into_iter()
            .filter(|task| {
                let first = seen.insert(task.id().clone());
                if !first {
                    tracing::warn!(task_id = %task.id(), "dropping duplicate task in snapshot");
                }
                first
            })
            .collect();
        self.tasks = fresh;
    }

    /// Sets the status of a task. Returns `true` when the store changed.
    pub fn set_status(&mut self, task_id: &TaskId, status: TaskStatus) -> bool {
        self.get_mut(task_id)
            .is_some_and(|task| task.set_status(status))
    }

    /// Adds or replaces a comment on a task. Returns `false` when the task is
    /// absent.
    pub fn upsert_comment(&mut self, task_id: &TaskId, comment: Comment) -> bool {
        match self.get_mut(task_id) {
            Some(task) => {
                task.upsert_comment(comment);
                true
            }
            None => false,
        }
    }

    /// Appends a task that is not yet present. Returns `false` for a
    /// duplicate identifier.
    pub fn insert(&mut self, task: Task) -> bool {
        if self.contains(task.id()) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Removes a task. Returns the removed task, if it was present.
    pub fn remove(&mut self, task_id: &TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == task_id)?;
        Some(self.tasks.remove(position))
    }

    /// Removes every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn get(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the status of a task, if present.
    #[must_use]
    pub fn status_of(&self, task_id: &TaskId) -> Option<TaskStatus> {
        self.get(task_id).map(Task::status)
    }

    /// Returns `true` when the task is present.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.get(task_id).is_some()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn get_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }
}
