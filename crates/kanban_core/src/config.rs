//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve where the board database lives and how logging is set up.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never fails; invalid log levels surface later from
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "KANBAN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "KANBAN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "KANBAN_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "kanban.sqlite3";

/// Process-level settings for one board session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// SQLite file backing the board.
    pub db_path: PathBuf,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl BoardConfig {
    /// Reads `KANBAN_DB_PATH`, `KANBAN_LOG_LEVEL` and `KANBAN_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Returns a copy pointing at another database file.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}
