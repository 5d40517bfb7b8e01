//! Owned database handle with an explicit lifecycle.
//!
//! # Responsibility
//! - Acquire one migrated connection at startup and release it at shutdown.
//! - Hand out borrowed connections to repositories.
//!
//! # Invariants
//! - A `Database` always wraps a connection with the current schema.
//! - `close` reports flush failures instead of swallowing them in `Drop`.

use super::open::{open_db, open_db_in_memory};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Board database owned by one application session.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens (or creates) the board database at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            conn: open_db(path)?,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory board database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            path: None,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Backing file path, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Closes the underlying connection.
    pub fn close(self) -> DbResult<()> {
        let mode = if self.path.is_some() { "file" } else { "memory" };
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok mode={mode}");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error mode={mode} error={err}");
                Err(DbError::Sqlite(err))
            }
        }
    }
}
