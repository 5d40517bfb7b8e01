//! Core domain logic for the kanban board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod dnd;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::BoardConfig;
pub use db::{Database, DbError, DbResult};
pub use dnd::gesture::{DragSession, GestureState};
pub use dnd::resolver::{resolve_drop, DropOutcome, DropTarget, StatusChange};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::column::{Column, ColumnId};
pub use model::task::{Task, TaskId, TaskPatch};
pub use model::time::{format_timestamp, parse_timestamp, Timestamp};
pub use model::validation::ValidationError;
pub use repo::column_repo::{ColumnRepository, SqliteColumnRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::board_service::{BoardError, BoardResult, BoardService};
pub use store::board_store::{BoardSnapshot, BoardStore, Lane};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
