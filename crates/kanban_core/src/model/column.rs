//! Column domain model.
//!
//! # Responsibility
//! - Define the named status bucket tasks are grouped into.
//! - Own title normalization used for duplicate detection.
//!
//! # Invariants
//! - `id` is stable and independent from `title`; titles are not renamed.
//! - Titles are unique per board under `title_key` comparison. The check
//!   happens at creation time only.

use crate::model::time::{self, Timestamp};
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Identifier of a column, also used as task status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh identifier decoupled from any title.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Named status bucket on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub created_at: Timestamp,
}

impl Column {
    /// Creates a column with a generated id and a normalized title.
    ///
    /// # Errors
    /// - `EmptyColumnTitle` when the title is blank.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        Self::with_id(ColumnId::generate(), title)
    }

    /// Creates a column with a caller-provided id.
    pub fn with_id(id: ColumnId, title: &str) -> Result<Self, ValidationError> {
        let title = normalize_column_title(title);
        if title.is_empty() {
            return Err(ValidationError::EmptyColumnTitle);
        }
        Ok(Self {
            id,
            title,
            created_at: time::now(),
        })
    }

    /// Returns whether `title` collides with this column's title.
    pub fn title_matches(&self, title: &str) -> bool {
        title_key(&self.title) == title_key(title)
    }
}

/// Trims and collapses inner whitespace runs into single spaces.
pub fn normalize_column_title(title: &str) -> String {
    WHITESPACE_RE.replace_all(title.trim(), " ").into_owned()
}

/// Comparison key for case-insensitive title uniqueness.
pub fn title_key(title: &str) -> String {
    normalize_column_title(title).to_lowercase()
}
