//! FFI use-case API for the desktop board UI.
//!
//! # Responsibility
//! - Expose board actions to Dart via FRB as flat view types.
//! - Own the single board session between `board_open` and `board_close`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back as human-readable messages, never as exceptions.
//! - Board actions run off the UI isolate (non-`sync` FRB functions).
//! - The one `sync` board call (`board_drag_start`) never waits on the
//!   session lock; it yields `None` while a write holds it.

use kanban_core::{
    core_version as core_version_inner, format_timestamp, init_logging as init_logging_inner,
    parse_timestamp, ping as ping_inner, BoardConfig, BoardService, Column, ColumnId, Database,
    DropTarget, Task, TaskId, TaskPatch,
};
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, TryLockError};
use uuid::Uuid;

static BOARD: Mutex<Option<BoardService<Database>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Column as rendered by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: String,
    pub title: String,
}

/// Task card as rendered by the board. Dates are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub reminder_at: Option<String>,
}

/// One column with its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneView {
    pub column: ColumnView,
    pub tasks: Vec<TaskView>,
}

/// Board state envelope returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshotResponse {
    pub ok: bool,
    pub lanes: Vec<LaneView>,
    /// Tasks whose status names no existing column.
    pub orphaned: Vec<TaskView>,
    /// Empty on success; error text otherwise.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created or affected task/column, when there is one.
    pub id: Option<String>,
    /// Human-readable message shown near the triggering control.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Optional-field edit request mirroring the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// ISO-8601 timestamp.
    pub completed_at: Option<String>,
    /// ISO-8601 timestamp.
    pub reminder_at: Option<String>,
}

/// Opens the board database and loads it into memory.
///
/// `db_path = None` falls back to `KANBAN_DB_PATH` or the temp-dir default.
/// Reopening replaces (and closes) the previous session.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
pub fn board_open(db_path: Option<String>) -> String {
    let mut config = BoardConfig::from_env();
    if let Some(path) = db_path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
        config = config.with_db_path(path);
    }

    let service = match Database::open(&config.db_path) {
        Ok(database) => match BoardService::open(database) {
            Ok(service) => service,
            Err(err) => return format!("board_open failed: {err}"),
        },
        Err(err) => return format!("board_open failed: {err}"),
    };

    let mut guard = lock_board();
    if let Some(previous) = guard.replace(service) {
        close_service(previous);
    }
    info!(
        "event=board_session module=ffi status=open db_path={}",
        config.db_path.display()
    );
    String::new()
}

/// Closes the current board session, if any.
///
/// Returns empty string on success and error message on failure.
pub fn board_close() -> String {
    match lock_board().take() {
        Some(service) => close_service(service),
        None => String::new(),
    }
}

/// Returns all columns with their tasks.
pub fn board_snapshot() -> BoardSnapshotResponse {
    match with_board(|board| Ok(board.snapshot())) {
        Ok(snapshot) => BoardSnapshotResponse {
            ok: true,
            lanes: snapshot
                .lanes
                .into_iter()
                .map(|lane| LaneView {
                    column: to_column_view(&lane.column),
                    tasks: lane.tasks.iter().map(to_task_view).collect(),
                })
                .collect(),
            orphaned: snapshot.orphaned.iter().map(to_task_view).collect(),
            message: String::new(),
        },
        Err(message) => BoardSnapshotResponse {
            ok: false,
            lanes: Vec::new(),
            orphaned: Vec::new(),
            message,
        },
    }
}

/// Adds a column; duplicate titles are rejected.
pub fn board_add_column(title: String) -> BoardActionResponse {
    respond(
        "board_add_column",
        with_board(|board| board.add_column(&title).map_err(|err| err.to_string())),
        |column| ("Column added.", Some(column.id.to_string())),
    )
}

/// Deletes an empty column.
pub fn board_delete_column(column_id: String) -> BoardActionResponse {
    let id = ColumnId::new(column_id.trim());
    respond(
        "board_delete_column",
        with_board(|board| board.delete_column(&id).map_err(|err| err.to_string())),
        |()| ("Column deleted.", Some(id.to_string())),
    )
}

/// Creates a task in the given column.
pub fn board_create_task(title: String, description: String, status: String) -> BoardActionResponse {
    let status = ColumnId::new(status.trim());
    respond(
        "board_create_task",
        with_board(|board| {
            board
                .create_task(&title, &description, &status)
                .map_err(|err| err.to_string())
        }),
        |task| ("Task created.", Some(task.id.to_string())),
    )
}

/// Applies the defined fields of `edit` to a task.
pub fn board_update_task(task_id: String, edit: TaskEdit) -> BoardActionResponse {
    let parsed = parse_task_id(&task_id).and_then(|id| to_patch(edit).map(|patch| (id, patch)));
    let (id, patch) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => return BoardActionResponse::failure(format!("board_update_task failed: {message}")),
    };
    respond(
        "board_update_task",
        with_board(|board| board.update_task(id, &patch).map_err(|err| err.to_string())),
        |_| ("Task updated.", Some(id.to_string())),
    )
}

/// Deletes a task; unknown ids succeed silently.
pub fn board_delete_task(task_id: String) -> BoardActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return BoardActionResponse::failure(format!("board_delete_task failed: {message}")),
    };
    respond(
        "board_delete_task",
        with_board(|board| board.delete_task(id).map_err(|err| err.to_string())),
        |()| ("Task deleted.", Some(id.to_string())),
    )
}

/// Moves a task to another column without a drag gesture.
pub fn board_move_task(task_id: String, status: String) -> BoardActionResponse {
    let id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(message) => return BoardActionResponse::failure(format!("board_move_task failed: {message}")),
    };
    let status = ColumnId::new(status.trim());
    respond(
        "board_move_task",
        with_board(|board| board.move_task(id, &status).map_err(|err| err.to_string())),
        |moved| {
            let message = if moved { "Task moved." } else { "Task unchanged." };
            (message, Some(id.to_string()))
        },
    )
}

/// Starts a drag gesture and returns the card to float under the pointer.
///
/// # FFI contract
/// - Sync call that does not block: returns `None` when no board is open,
///   the task is unknown, or another board action is still running.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_start(task_id: String) -> Option<TaskView> {
    let mut guard = match BOARD.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => {
            debug!("event=board_drag_start module=ffi status=skip reason=board_busy");
            return None;
        }
    };
    guard
        .as_mut()
        .and_then(|board| board.begin_drag(&task_id).map(to_task_view))
}

/// Ends the gesture over an optional target (`over_kind` = `task|column`).
///
/// The response message names the resolved outcome, e.g. `moved` or
/// `cancelled`.
pub fn board_drag_end(
    task_id: String,
    over_id: Option<String>,
    over_kind: Option<String>,
) -> BoardActionResponse {
    let target = match (over_id, over_kind) {
        (Some(id), Some(kind)) => match DropTarget::from_kind(&kind, id) {
            Some(target) => Some(target),
            None => {
                return BoardActionResponse::failure(format!(
                    "board_drag_end failed: unsupported drop target kind `{kind}`"
                ))
            }
        },
        _ => None,
    };
    respond(
        "board_drag_end",
        with_board(|board| {
            board
                .end_drag(&task_id, target.as_ref())
                .map_err(|err| err.to_string())
        }),
        |outcome| {
            let id = outcome.status_change().map(|change| change.task_id.to_string());
            (outcome.label(), id)
        },
    )
}

fn lock_board() -> MutexGuard<'static, Option<BoardService<Database>>> {
    BOARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_board<T>(
    f: impl FnOnce(&mut BoardService<Database>) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = lock_board();
    let board = guard
        .as_mut()
        .ok_or_else(|| "board is not open; call board_open first".to_string())?;
    f(board)
}

fn respond<T>(
    action: &str,
    result: Result<T, String>,
    on_success: impl FnOnce(T) -> (&'static str, Option<String>),
) -> BoardActionResponse {
    match result {
        Ok(value) => {
            let (message, id) = on_success(value);
            BoardActionResponse::success(message, id)
        }
        Err(err) => {
            warn!("{}", error_event(action, &err));
            BoardActionResponse::failure(format!("{action} failed: {err}"))
        }
    }
}

fn error_event(action: &str, err: &str) -> String {
    format!("event={action} module=ffi status=error error_code={action}_failed error={err}")
}

fn close_service(service: BoardService<Database>) -> String {
    match service.into_gateway().close() {
        Ok(()) => {
            info!("event=board_session module=ffi status=closed");
            String::new()
        }
        Err(err) => format!("board_close failed: {err}"),
    }
}

fn parse_task_id(value: &str) -> Result<TaskId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid task id `{value}`"))
}

fn to_patch(edit: TaskEdit) -> Result<TaskPatch, String> {
    let parse = |field: &str, value: Option<String>| {
        value
            .map(|raw| {
                parse_timestamp(&raw).map_err(|err| format!("invalid {field} `{raw}`: {err}"))
            })
            .transpose()
    };
    Ok(TaskPatch {
        title: edit.title,
        description: edit.description,
        status: edit.status.map(|status| ColumnId::new(status.trim())),
        completed_at: parse("completed_at", edit.completed_at)?,
        reminder_at: parse("reminder_at", edit.reminder_at)?,
    })
}

fn to_column_view(column: &Column) -> ColumnView {
    ColumnView {
        id: column.id.to_string(),
        title: column.title.clone(),
    }
}

fn to_task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status.to_string(),
        created_at: format_timestamp(&task.created_at),
        completed_at: task.completed_at.as_ref().map(format_timestamp),
        reminder_at: task.reminder_at.as_ref().map(format_timestamp),
    }
}
