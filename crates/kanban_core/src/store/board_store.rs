//! In-memory board state.
//!
//! # Responsibility
//! - Hold the current task and column collections for the UI.
//! - Offer mutations that mirror repository writes, plus the inverse
//!   operations the board service needs to revert them.
//!
//! # Invariants
//! - Task ids and column ids are unique within their collection.
//! - Collections keep insertion order; there is no in-column ordering field.
//! - The store never touches storage.

use crate::model::column::{Column, ColumnId};
use crate::model::task::{Task, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// Normalized task and column collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    tasks: Vec<Task>,
    columns: Vec<Column>,
}

/// One rendered column with the tasks it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub column: Column,
    pub tasks: Vec<Task>,
}

/// Column-grouped projection of the store used by board renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Lanes in column order.
    pub lanes: Vec<Lane>,
    /// Tasks whose status matches no column.
    pub orphaned: Vec<Task>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replaces all tasks, as done by the initial bulk load.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Finds a column whose title collides case-insensitively with `title`.
    pub fn column_with_title(&self, title: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.title_matches(title))
    }

    pub fn tasks_in_column<'a>(&'a self, id: &'a ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |task| &task.status == id)
    }

    pub fn count_tasks_in_column(&self, id: &ColumnId) -> usize {
        self.tasks_in_column(id).count()
    }

    /// Appends a task. A task with the same id is replaced in place.
    pub fn add_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Merges `patch` into the task and returns its previous value.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        let previous = task.clone();
        task.apply(patch);
        Some(previous)
    }

    /// Reassigns the task to `status` and returns the previous status.
    pub fn move_task(&mut self, id: TaskId, status: ColumnId) -> Option<ColumnId> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        Some(std::mem::replace(&mut task.status, status))
    }

    /// Removes the task, returning it with its former position.
    pub fn remove_task(&mut self, id: TaskId) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some((index, self.tasks.remove(index)))
    }

    /// Puts a task back at `index`, clamped to the current length.
    pub fn restore_task(&mut self, index: usize, task: Task) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
    }

    /// Replaces a task record wholesale, used to undo a merge.
    pub fn replace_task(&mut self, task: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            *existing = task;
        }
    }

    pub fn add_column(&mut self, column: Column) {
        match self
            .columns
            .iter_mut()
            .find(|existing| existing.id == column.id)
        {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Removes the column, returning it with its former position.
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<(usize, Column)> {
        let index = self.columns.iter().position(|column| &column.id == id)?;
        Some((index, self.columns.remove(index)))
    }

    pub fn restore_column(&mut self, index: usize, column: Column) {
        let index = index.min(self.columns.len());
        self.columns.insert(index, column);
    }

    /// Groups tasks by column in column order.
    pub fn snapshot(&self) -> BoardSnapshot {
        let lanes = self
            .columns
            .iter()
            .map(|column| Lane {
                column: column.clone(),
                tasks: self.tasks_in_column(&column.id).cloned().collect(),
            })
            .collect();
        let orphaned = self
            .tasks
            .iter()
            .filter(|task| !self.has_column(&task.status))
            .cloned()
            .collect();
        BoardSnapshot { lanes, orphaned }
    }
}
