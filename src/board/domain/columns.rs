//! Status-partitioned projection of the task store.

use super::{Task, TaskStatus};

/// Tasks of one column in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    status: TaskStatus,
    tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    /// Returns the column's status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Returns the tasks placed in this column.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The three board columns derived from a task sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns<'a> {
    todo: Column<'a>,
    in_progress: Column<'a>,
    done: Column<'a>,
}

impl<'a> Columns<'a> {
    /// Returns the column for a status.
    #[must_use]
    pub const fn get(&self, status: TaskStatus) -> &Column<'a> {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Iterates the columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Column<'a>> {
        TaskStatus::ALL.into_iter().map(|status| self.get(status))
    }

    /// Returns the total number of projected tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(Column::len).sum()
    }

    /// Returns `true` when every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(Column::is_empty)
    }

    /// Returns the identifiers of a column's tasks, mostly for assertions.
    #[must_use]
    pub fn ids(&self, status: TaskStatus) -> Vec<&'a str> {
        self.get(status)
            .tasks()
            .iter()
            .map(|task| task.id().as_str())
            .collect()
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Column<'a> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}

/// Groups tasks by status, preserving their relative order.
///
/// Every task lands in exactly one column because statuses are normalised
/// on ingestion.
#[must_use]
pub fn project_columns(tasks: &[Task]) -> Columns<'_> {
    let empty = |status| Column {
        status,
        tasks: Vec::new(),
    };
    let mut columns = Columns {
        todo: empty(TaskStatus::Todo),
        in_progress: empty(TaskStatus::InProgress),
        done: empty(TaskStatus::Done),
    };
    for task in tasks {
        columns.column_mut(task.status()).tasks.push(task);
    }
    columns
}
