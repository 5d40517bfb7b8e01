//! Persistence gateway: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define row-level CRUD contracts for tasks and columns.
//! - Isolate SQL details from the store and board service.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Update/delete of an absent row is a silent no-op, not an error.
//! - Read paths reject unparseable persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::time::{parse_timestamp, Timestamp};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod column_repo;
mod gateway;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-side failure for task and column persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_timestamp_column(
    table: &str,
    column: &str,
    value: &str,
) -> RepoResult<Timestamp> {
    parse_timestamp(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid timestamp `{value}` in {table}.{column}"))
    })
}
