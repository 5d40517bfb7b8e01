//! Column repository contract and SQLite implementation.
//!
//! # Invariants
//! - Columns are returned in creation order.
//! - Deleting a column never touches `tasks`; the non-empty guard lives in
//!   the board service.

use crate::model::column::{Column, ColumnId};
use crate::model::time::format_timestamp;
use crate::repo::{parse_timestamp_column, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

/// Row-level persistence for board columns.
pub trait ColumnRepository {
    fn load_all_columns(&self) -> RepoResult<Vec<Column>>;
    fn insert_column(&self, column: &Column) -> RepoResult<()>;
    fn delete_column(&self, id: &ColumnId) -> RepoResult<()>;

    /// Builds a column with a generated id from `title` and inserts it.
    fn create_column(&self, title: &str) -> RepoResult<Column> {
        let column = Column::new(title)?;
        self.insert_column(&column)?;
        Ok(column)
    }
}

/// SQLite-backed column repository.
pub struct SqliteColumnRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteColumnRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ColumnRepository for SqliteColumnRepository<'_> {
    fn load_all_columns(&self) -> RepoResult<Vec<Column>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, createdAt
             FROM columns
             ORDER BY createdAt ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(parse_column_row(row)?);
        }
        Ok(columns)
    }

    fn insert_column(&self, column: &Column) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO columns (id, title, createdAt) VALUES (?1, ?2, ?3);",
            params![
                column.id.as_str(),
                column.title.as_str(),
                format_timestamp(&column.created_at),
            ],
        )?;
        Ok(())
    }

    fn delete_column(&self, id: &ColumnId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM columns WHERE id = ?1;", [id.as_str()])?;
        if changed == 0 {
            debug!("event=column_delete module=repo status=noop reason=missing_row column_id={id}");
        }
        Ok(())
    }
}

fn parse_column_row(row: &Row<'_>) -> RepoResult<Column> {
    let created_text: String = row.get("createdAt")?;
    Ok(Column {
        id: ColumnId::new(row.get::<_, String>("id")?),
        title: row.get("title")?,
        created_at: parse_timestamp_column("columns", "createdAt", &created_text)?,
    })
}
