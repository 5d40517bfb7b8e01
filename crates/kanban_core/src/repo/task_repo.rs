//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load, insert, partially update and delete rows of `tasks`.
//!
//! # Invariants
//! - Partial updates write only the fields defined in the patch.
//! - Timestamps are written as canonical ISO-8601 text, absent ones as NULL.
//! - Rows are returned in insertion order.
//! - Rows that parse but fail field validation are skipped with a warning.

use crate::model::column::ColumnId;
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::model::time::format_timestamp;
use crate::repo::{parse_timestamp_column, RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    createdAt,
    completedAt,
    reminderAt
FROM tasks";

/// Row-level persistence for task cards.
pub trait TaskRepository {
    fn load_all_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Inserts a task row using the record's own id and timestamps.
    fn insert_task(&self, task: &Task) -> RepoResult<()>;
    /// Writes the defined patch fields to the row with `id`.
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;

    /// Builds a new task from user input and inserts it.
    fn create_task(&self, title: &str, description: &str, status: &ColumnId) -> RepoResult<Task> {
        let task = Task::new(title, description, status.clone())?;
        self.insert_task(&task)?;
        Ok(task)
    }
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            let task = parse_task_row(row)?;
            if let Err(err) = task.validate() {
                warn!(
                    "event=task_load module=repo status=skip reason=invalid_row task_id={} error={err}",
                    task.id
                );
                continue;
            }
            tasks.push(task);
        }
        Ok(tasks)
    }

    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                createdAt,
                completedAt,
                reminderAt
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task.status.as_str(),
                format_timestamp(&task.created_at),
                task.completed_at.as_ref().map(format_timestamp),
                task.reminder_at.as_ref().map(format_timestamp),
            ],
        )?;
        Ok(())
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        patch.validate()?;

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.trim().to_string()));
        }
        if let Some(description) = patch.description.as_ref() {
            assignments.push("description = ?");
            bind_values.push(Value::Text(description.clone()));
        }
        if let Some(status) = patch.status.as_ref() {
            assignments.push("status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(completed_at) = patch.completed_at.as_ref() {
            assignments.push("completedAt = ?");
            bind_values.push(Value::Text(format_timestamp(completed_at)));
        }
        if let Some(reminder_at) = patch.reminder_at.as_ref() {
            assignments.push("reminderAt = ?");
            bind_values.push(Value::Text(format_timestamp(reminder_at)));
        }

        if assignments.is_empty() {
            debug!("event=task_update module=repo status=skip reason=empty_patch task_id={id}");
            return Ok(());
        }

        bind_values.push(Value::Text(id.to_string()));
        let sql = format!("UPDATE tasks SET {} WHERE id = ?;", assignments.join(", "));
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            debug!("event=task_update module=repo status=noop reason=missing_row task_id={id}");
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            debug!("event=task_delete module=repo status=noop reason=missing_row task_id={id}");
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;

    let created_text: String = row.get("createdAt")?;
    let created_at = parse_timestamp_column("tasks", "createdAt", &created_text)?;
    let completed_at = match row.get::<_, Option<String>>("completedAt")? {
        Some(value) => Some(parse_timestamp_column("tasks", "completedAt", &value)?),
        None => None,
    };
    let reminder_at = match row.get::<_, Option<String>>("reminderAt")? {
        Some(value) => Some(parse_timestamp_column("tasks", "reminderAt", &value)?),
        None => None,
    };

    let task = Task {
        id,
        title: row.get("title")?,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
        status: ColumnId::new(row.get::<_, String>("status")?),
        created_at,
        completed_at,
        reminder_at,
    };
    Ok(task)
}
