//! Validation failures raised before any store or storage mutation.

use crate::model::column::ColumnId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected by board invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is blank after trim.
    EmptyTaskTitle,
    /// Column title is blank after trim.
    EmptyColumnTitle,
    /// Another column already uses this title (case-insensitive).
    DuplicateColumnTitle(String),
    /// Column still has tasks referencing it.
    ColumnNotEmpty {
        column_id: ColumnId,
        task_count: usize,
    },
    /// Task status references a column that does not exist.
    UnknownColumn(ColumnId),
    /// Timestamp year falls outside `0000..=9999`.
    TimestampOutOfRange { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTaskTitle => write!(f, "task title must not be empty"),
            Self::EmptyColumnTitle => write!(f, "column title must not be empty"),
            Self::DuplicateColumnTitle(title) => {
                write!(f, "a column named `{title}` already exists")
            }
            Self::ColumnNotEmpty {
                column_id,
                task_count,
            } => write!(
                f,
                "column `{column_id}` still contains {task_count} task(s) and cannot be deleted"
            ),
            Self::UnknownColumn(column_id) => write!(f, "column not found: {column_id}"),
            Self::TimestampOutOfRange { field, value } => {
                write!(f, "{field} `{value}` is outside the supported years 0000-9999")
            }
        }
    }
}

impl Error for ValidationError {}
