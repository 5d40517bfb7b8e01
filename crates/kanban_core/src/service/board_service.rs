//! Board use-case service.
//!
//! # Responsibility
//! - Own the in-memory store, the drag session and the injected gateway.
//! - Apply every user action as: validate, mutate store, persist.
//! - Guard column creation and deletion.
//!
//! # Invariants
//! - Validation failures leave store and storage untouched.
//! - A storage failure after an optimistic store mutation reverts that
//!   mutation before the error is returned, so store and storage agree.
//! - Tasks may only be created in, or moved to, existing columns.

use crate::dnd::gesture::DragSession;
use crate::dnd::resolver::{DropOutcome, DropTarget};
use crate::model::column::{Column, ColumnId};
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::model::validation::ValidationError;
use crate::repo::column_repo::ColumnRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::store::board_store::{BoardSnapshot, BoardStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Errors surfaced by board use-cases.
#[derive(Debug)]
pub enum BoardError {
    /// Input rejected before any mutation.
    Validation(ValidationError),
    /// Gateway failure; the optimistic store change has been reverted.
    Storage(RepoError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other),
        }
    }
}

impl BoardError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Explicitly constructed board state container.
pub struct BoardService<G> {
    gateway: G,
    store: BoardStore,
    drag: DragSession,
}

impl<G: TaskRepository + ColumnRepository> BoardService<G> {
    /// Creates a service with an empty store. Call `load` to populate it.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: BoardStore::new(),
            drag: DragSession::new(),
        }
    }

    /// Creates a service and bulk-loads the board from storage.
    pub fn open(gateway: G) -> BoardResult<Self> {
        let mut service = Self::new(gateway);
        service.load()?;
        Ok(service)
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Releases the gateway, e.g. to close the database at shutdown.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.store.snapshot()
    }

    /// Replaces the store with the persisted board.
    ///
    /// The store is left unchanged when either load fails.
    pub fn load(&mut self) -> BoardResult<()> {
        let columns = self.gateway.load_all_columns()?;
        let tasks = self.gateway.load_all_tasks()?;
        info!(
            "event=board_load module=service status=ok columns={} tasks={}",
            columns.len(),
            tasks.len()
        );
        self.store.set_columns(columns);
        self.store.set_tasks(tasks);
        Ok(())
    }

    /// Adds a column with a unique (case-insensitive) title.
    pub fn add_column(&mut self, title: &str) -> BoardResult<Column> {
        let column = Column::new(title)?;
        if self.store.column_with_title(&column.title).is_some() {
            return Err(ValidationError::DuplicateColumnTitle(column.title).into());
        }

        self.store.add_column(column.clone());
        if let Err(err) = self.gateway.insert_column(&column) {
            self.store.remove_column(&column.id);
            return Err(self.storage_failure("column_add", err));
        }

        info!(
            "event=column_add module=service status=ok column_id={}",
            column.id
        );
        Ok(column)
    }

    /// Deletes a column that no task references.
    ///
    /// Unknown ids are passed through to storage as a no-op delete.
    pub fn delete_column(&mut self, id: &ColumnId) -> BoardResult<()> {
        let task_count = self.store.count_tasks_in_column(id);
        if task_count > 0 {
            return Err(ValidationError::ColumnNotEmpty {
                column_id: id.clone(),
                task_count,
            }
            .into());
        }

        let removed = self.store.remove_column(id);
        if let Err(err) = self.gateway.delete_column(id) {
            if let Some((index, column)) = removed {
                self.store.restore_column(index, column);
            }
            return Err(self.storage_failure("column_delete", err));
        }

        info!("event=column_delete module=service status=ok column_id={id}");
        Ok(())
    }

    /// Creates a task in an existing column.
    pub fn create_task(
        &mut self,
        title: &str,
        description: &str,
        status: &ColumnId,
    ) -> BoardResult<Task> {
        let task = Task::new(title, description, status.clone())?;
        self.ensure_column(status)?;

        self.store.add_task(task.clone());
        if let Err(err) = self.gateway.insert_task(&task) {
            self.store.remove_task(task.id);
            return Err(self.storage_failure("task_create", err));
        }

        info!(
            "event=task_create module=service status=ok task_id={} column_id={}",
            task.id, task.status
        );
        Ok(task)
    }

    /// Merges the defined patch fields into a task and persists them.
    ///
    /// Returns the updated task, or `None` when the id is unknown (the
    /// storage update is still issued and is a no-op there).
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> BoardResult<Option<Task>> {
        let patch = patch.normalized();
        patch.validate()?;
        if let Some(status) = patch.status.as_ref() {
            self.ensure_column(status)?;
        }
        if patch.is_empty() {
            return Ok(self.store.task(id).cloned());
        }

        let previous = self.store.update_task(id, &patch);
        if let Err(err) = self.gateway.update_task(id, &patch) {
            if let Some(previous) = previous {
                self.store.replace_task(previous);
            }
            return Err(self.storage_failure("task_update", err));
        }

        Ok(self.store.task(id).cloned())
    }

    /// Reassigns a task to another existing column.
    ///
    /// Returns `false` when nothing changed (unknown task or same column).
    pub fn move_task(&mut self, id: TaskId, status: &ColumnId) -> BoardResult<bool> {
        self.ensure_column(status)?;
        let Some(previous) = self.store.move_task(id, status.clone()) else {
            return Ok(false);
        };
        if &previous == status {
            return Ok(false);
        }

        if let Err(err) = self.gateway.update_task(id, &TaskPatch::status(status.clone())) {
            self.store.move_task(id, previous);
            return Err(self.storage_failure("task_move", err));
        }

        info!(
            "event=task_move module=service status=ok task_id={id} from={previous} to={status}"
        );
        Ok(true)
    }

    /// Deletes a task. Absent tasks are a silent no-op.
    pub fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        let removed = self.store.remove_task(id);
        if let Err(err) = self.gateway.delete_task(id) {
            if let Some((index, task)) = removed {
                self.store.restore_task(index, task);
            }
            return Err(self.storage_failure("task_delete", err));
        }
        Ok(())
    }

    /// Starts a drag gesture and returns the floating task.
    pub fn begin_drag(&mut self, source_id: &str) -> Option<&Task> {
        self.drag.begin(&self.store, source_id)
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.drag.active_task()
    }

    /// Ends the gesture and applies the resolved column change, if any.
    pub fn end_drag(
        &mut self,
        source_id: &str,
        target: Option<&DropTarget>,
    ) -> BoardResult<DropOutcome> {
        let outcome = self.drag.end(&self.store, source_id, target);
        if let Some(change) = outcome.status_change() {
            self.move_task(change.task_id, &change.to)?;
        }
        Ok(outcome)
    }

    fn ensure_column(&self, id: &ColumnId) -> BoardResult<()> {
        if self.store.has_column(id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownColumn(id.clone()).into())
        }
    }

    fn storage_failure(&self, event: &str, err: RepoError) -> BoardError {
        warn!("event={event} module=service status=error action=reverted error={err}");
        BoardError::from(err)
    }
}
