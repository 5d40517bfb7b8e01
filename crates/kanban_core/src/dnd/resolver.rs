//! Drop resolution for task drag gestures.
//!
//! # Responsibility
//! - Turn a drag-end payload (source id + optional drop target) into a
//!   decision against the current store snapshot.
//!
//! # Invariants
//! - Resolution is pure: it never mutates the store.
//! - Dropping on a task card means "move into that card's column".
//! - Only `DropOutcome::Moved` requires a store mutation and a storage write.

use crate::model::column::ColumnId;
use crate::model::task::{Task, TaskId};
use crate::store::board_store::BoardStore;
use uuid::Uuid;

/// What the pointer was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Another task card; carries that card's id.
    Task(String),
    /// A column body; carries the column id.
    Column(String),
}

impl DropTarget {
    pub fn id(&self) -> &str {
        match self {
            Self::Task(id) | Self::Column(id) => id.as_str(),
        }
    }

    /// Builds a target from a UI payload kind (`task` or `column`).
    pub fn from_kind(kind: &str, id: impl Into<String>) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "task" => Some(Self::Task(id.into())),
            "column" => Some(Self::Column(id.into())),
            _ => None,
        }
    }
}

/// Column reassignment decided by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: TaskId,
    pub from: ColumnId,
    pub to: ColumnId,
}

/// Result of resolving one drag-end event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside any target.
    Cancelled,
    /// Released over the dragged card itself.
    DroppedOnSelf,
    /// Dragged id does not name a task in the store.
    UnknownSource,
    /// Target card or column does not exist in the store.
    UnknownTarget,
    /// Target resolves to the task's current column.
    Unchanged { task_id: TaskId },
    /// Task must move to another column.
    Moved(StatusChange),
}

impl DropOutcome {
    pub fn status_change(&self) -> Option<&StatusChange> {
        match self {
            Self::Moved(change) => Some(change),
            _ => None,
        }
    }

    /// Stable lowercase label for logs and FFI messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::DroppedOnSelf => "dropped_on_self",
            Self::UnknownSource => "unknown_source",
            Self::UnknownTarget => "unknown_target",
            Self::Unchanged { .. } => "unchanged",
            Self::Moved(_) => "moved",
        }
    }
}

/// Resolves the dragged task id to a task in `store`.
pub fn find_source_task<'a>(store: &'a BoardStore, source_id: &str) -> Option<&'a Task> {
    parse_task_id(source_id).and_then(|id| store.task(id))
}

/// Decides what a drag-end event means for the board.
pub fn resolve_drop(
    store: &BoardStore,
    source_id: &str,
    target: Option<&DropTarget>,
) -> DropOutcome {
    let Some(target) = target else {
        return DropOutcome::Cancelled;
    };
    if source_id.trim() == target.id().trim() {
        return DropOutcome::DroppedOnSelf;
    }
    let Some(source) = find_source_task(store, source_id) else {
        return DropOutcome::UnknownSource;
    };

    let new_status = match target {
        DropTarget::Task(id) => match find_source_task(store, id) {
            Some(target_task) => target_task.status.clone(),
            None => return DropOutcome::UnknownTarget,
        },
        DropTarget::Column(id) => {
            let column_id = ColumnId::new(id.trim());
            if !store.has_column(&column_id) {
                return DropOutcome::UnknownTarget;
            }
            column_id
        }
    };

    if new_status == source.status {
        return DropOutcome::Unchanged { task_id: source.id };
    }

    DropOutcome::Moved(StatusChange {
        task_id: source.id,
        from: source.status.clone(),
        to: new_status,
    })
}

fn parse_task_id(value: &str) -> Option<TaskId> {
    Uuid::parse_str(value.trim()).ok()
}
