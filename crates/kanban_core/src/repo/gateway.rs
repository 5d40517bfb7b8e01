//! Repository impls for the owned `Database` handle.
//!
//! Lets a long-lived board session own its storage instead of borrowing a
//! connection from the caller.

use crate::db::Database;
use crate::model::column::{Column, ColumnId};
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::repo::column_repo::{ColumnRepository, SqliteColumnRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoResult;

impl TaskRepository for Database {
    fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
        SqliteTaskRepository::new(self.connection()).load_all_tasks()
    }

    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        SqliteTaskRepository::new(self.connection()).insert_task(task)
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        SqliteTaskRepository::new(self.connection()).update_task(id, patch)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        SqliteTaskRepository::new(self.connection()).delete_task(id)
    }
}

impl ColumnRepository for Database {
    fn load_all_columns(&self) -> RepoResult<Vec<Column>> {
        SqliteColumnRepository::new(self.connection()).load_all_columns()
    }

    fn insert_column(&self, column: &Column) -> RepoResult<()> {
        SqliteColumnRepository::new(self.connection()).insert_column(column)
    }

    fn delete_column(&self, id: &ColumnId) -> RepoResult<()> {
        SqliteColumnRepository::new(self.connection()).delete_column(id)
    }
}
