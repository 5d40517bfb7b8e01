//! Task domain model.
//!
//! # Responsibility
//! - Define the task card record and its partial-update shape.
//! - Validate task fields before store or storage writes.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and shared by store and storage.
//! - `title` is never blank.
//! - `status` names the column the task belongs to. Existence of that column
//!   is checked by the board service, not here.

use crate::model::column::ColumnId;
use crate::model::time::{self, Timestamp};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a task card.
pub type TaskId = Uuid;

/// Task card placed in exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Column id this task belongs to.
    pub status: ColumnId,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub reminder_at: Option<Timestamp>,
}

impl Task {
    /// Creates a task with a generated id and `created_at = now`.
    ///
    /// Title is trimmed; description is kept verbatim.
    ///
    /// # Errors
    /// - `EmptyTaskTitle` when the title is blank.
    pub fn new(
        title: &str,
        description: impl Into<String>,
        status: ColumnId,
    ) -> Result<Self, ValidationError> {
        let task = Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            description: description.into(),
            status,
            created_at: time::now(),
            completed_at: None,
            reminder_at: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        check_storable("created_at", Some(&self.created_at))?;
        check_storable("completed_at", self.completed_at.as_ref())?;
        check_storable("reminder_at", self.reminder_at.as_ref())
    }

    /// Merges all defined patch fields into this task.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(description) = patch.description.as_ref() {
            self.description = description.clone();
        }
        if let Some(status) = patch.status.as_ref() {
            self.status = status.clone();
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = Some(completed_at);
        }
        if let Some(reminder_at) = patch.reminder_at {
            self.reminder_at = Some(reminder_at);
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Partial task update. `None` fields are left untouched everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ColumnId>,
    pub completed_at: Option<Timestamp>,
    pub reminder_at: Option<Timestamp>,
}

impl TaskPatch {
    /// Patch that only reassigns the task to another column.
    pub fn status(status: ColumnId) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.completed_at.is_none()
            && self.reminder_at.is_none()
    }

    /// Returns a copy with trimmed title and storage-precision timestamps.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.as_ref().map(|title| title.trim().to_string()),
            description: self.description.clone(),
            status: self.status.clone(),
            completed_at: self.completed_at.map(time::normalize),
            reminder_at: self.reminder_at.map(time::normalize),
        }
    }

    /// Rejects a defined-but-blank title and unstorable dates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTaskTitle);
            }
        }
        check_storable("completed_at", self.completed_at.as_ref())?;
        check_storable("reminder_at", self.reminder_at.as_ref())
    }
}

fn check_storable(field: &'static str, value: Option<&Timestamp>) -> Result<(), ValidationError> {
    match value {
        Some(value) if !time::is_storable(value) => Err(ValidationError::TimestampOutOfRange {
            field,
            value: time::format_timestamp(value),
        }),
        _ => Ok(()),
    }
}
