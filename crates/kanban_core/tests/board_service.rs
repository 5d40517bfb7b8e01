use kanban_core::{
    BoardError, BoardService, Column, ColumnId, ColumnRepository, Database, DbError, DropOutcome,
    DropTarget, RepoError, RepoResult, Task, TaskId, TaskPatch, TaskRepository, ValidationError,
};
use std::cell::{Cell, RefCell};

/// In-memory gateway that can be told to fail every write.
#[derive(Default)]
struct FakeGateway {
    tasks: RefCell<Vec<Task>>,
    columns: RefCell<Vec<Column>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl FakeGateway {
    fn with_columns(ids: &[&str]) -> Self {
        let gateway = Self::default();
        for id in ids {
            gateway
                .columns
                .borrow_mut()
                .push(Column::with_id(ColumnId::from(*id), id).unwrap());
        }
        gateway
    }

    fn write(&self) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        if self.fail_writes.get() {
            return Err(RepoError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        Ok(())
    }
}

impl TaskRepository for FakeGateway {
    fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.tasks.borrow().clone())
    }

    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        self.write()?;
        self.tasks.borrow_mut().push(task.clone());
        Ok(())
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        self.write()?;
        if let Some(task) = self.tasks.borrow_mut().iter_mut().find(|t| t.id == id) {
            task.apply(patch);
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.write()?;
        self.tasks.borrow_mut().retain(|task| task.id != id);
        Ok(())
    }
}

impl ColumnRepository for FakeGateway {
    fn load_all_columns(&self) -> RepoResult<Vec<Column>> {
        Ok(self.columns.borrow().clone())
    }

    fn insert_column(&self, column: &Column) -> RepoResult<()> {
        self.write()?;
        self.columns.borrow_mut().push(column.clone());
        Ok(())
    }

    fn delete_column(&self, id: &ColumnId) -> RepoResult<()> {
        self.write()?;
        self.columns.borrow_mut().retain(|column| &column.id != id);
        Ok(())
    }
}

fn fake_board() -> BoardService<FakeGateway> {
    BoardService::open(FakeGateway::with_columns(&["todo", "in-progress", "done"])).unwrap()
}

#[test]
fn duplicate_column_title_is_rejected_without_writes() {
    let mut board = fake_board();
    board.add_column("Review").unwrap();
    let writes_before = board.gateway().writes.get();

    let err = board.add_column("  REVIEW ").unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(ValidationError::DuplicateColumnTitle(_))
    ));
    assert_eq!(board.store().columns().len(), 4);
    assert_eq!(board.gateway().writes.get(), writes_before);
}

#[test]
fn deleting_non_empty_column_is_rejected() {
    let mut board = fake_board();
    board
        .create_task("Pending", "", &ColumnId::from("todo"))
        .unwrap();

    let err = board.delete_column(&ColumnId::from("todo")).unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(ValidationError::ColumnNotEmpty { task_count: 1, .. })
    ));
    assert!(board.store().has_column(&ColumnId::from("todo")));
    assert_eq!(board.gateway().columns.borrow().len(), 3);
}

#[test]
fn deleting_empty_column_removes_it_everywhere() {
    let mut board = fake_board();
    board.delete_column(&ColumnId::from("in-progress")).unwrap();

    assert!(!board.store().has_column(&ColumnId::from("in-progress")));
    assert_eq!(board.gateway().columns.borrow().len(), 2);
}

#[test]
fn failed_task_insert_reverts_store() {
    let mut board = fake_board();
    board.gateway().fail_writes.set(true);

    let err = board
        .create_task("Doomed", "", &ColumnId::from("todo"))
        .unwrap_err();
    assert!(matches!(err, BoardError::Storage(_)));
    assert!(board.store().tasks().is_empty());
}

#[test]
fn failed_move_restores_previous_status() {
    let mut board = fake_board();
    let task = board
        .create_task("Sticky", "", &ColumnId::from("todo"))
        .unwrap();
    board.gateway().fail_writes.set(true);

    let err = board.move_task(task.id, &ColumnId::from("done")).unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(board.store().task(task.id).unwrap().status.as_str(), "todo");
}

#[test]
fn failed_drag_end_reports_storage_error_and_keeps_column() {
    let mut board = fake_board();
    let task = board
        .create_task("Dragged", "", &ColumnId::from("todo"))
        .unwrap();
    board.gateway().fail_writes.set(true);

    board.begin_drag(&task.id.to_string());
    let target = DropTarget::Column("done".to_string());
    let err = board
        .end_drag(&task.id.to_string(), Some(&target))
        .unwrap_err();
    assert!(matches!(err, BoardError::Storage(_)));
    assert!(board.active_task().is_none());
    assert_eq!(board.store().task(task.id).unwrap().status.as_str(), "todo");
}

#[test]
fn failed_update_restores_previous_record() {
    let mut board = fake_board();
    let task = board
        .create_task("Original", "body", &ColumnId::from("todo"))
        .unwrap();
    board.gateway().fail_writes.set(true);

    let patch = TaskPatch {
        title: Some("Changed".to_string()),
        description: Some("new body".to_string()),
        ..TaskPatch::default()
    };
    board.update_task(task.id, &patch).unwrap_err();
    assert_eq!(board.store().task(task.id).unwrap(), &task);
}

#[test]
fn failed_deletes_restore_items_in_place() {
    let mut board = fake_board();
    let first = board.create_task("first", "", &ColumnId::from("todo")).unwrap();
    let second = board.create_task("second", "", &ColumnId::from("todo")).unwrap();
    board.gateway().fail_writes.set(true);

    board.delete_task(first.id).unwrap_err();
    assert_eq!(board.store().tasks()[0].id, first.id);
    assert_eq!(board.store().tasks()[1].id, second.id);

    board.delete_column(&ColumnId::from("in-progress")).unwrap_err();
    let ids: Vec<&str> = board
        .store()
        .columns()
        .iter()
        .map(|column| column.id.as_str())
        .collect();
    assert_eq!(ids, vec!["todo", "in-progress", "done"]);
}

#[test]
fn failed_column_add_reverts_store() {
    let mut board = fake_board();
    board.gateway().fail_writes.set(true);

    board.add_column("Later").unwrap_err();
    assert_eq!(board.store().columns().len(), 3);
}

#[test]
fn update_task_merges_fields_and_validates_status() {
    let mut board = fake_board();
    let task = board
        .create_task("Edit me", "", &ColumnId::from("todo"))
        .unwrap();

    let updated = board
        .update_task(
            task.id,
            &TaskPatch {
                description: Some("details".to_string()),
                status: Some(ColumnId::from("in-progress")),
                ..TaskPatch::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Edit me");
    assert_eq!(updated.description, "details");
    assert_eq!(updated.status.as_str(), "in-progress");

    let err = board
        .update_task(task.id, &TaskPatch::status(ColumnId::from("archive")))
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(ValidationError::UnknownColumn(_))
    ));
}

#[test]
fn update_of_unknown_task_is_silent() {
    let mut board = fake_board();
    let result = board
        .update_task(
            uuid::Uuid::new_v4(),
            &TaskPatch {
                title: Some("ghost".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn drag_within_column_issues_no_write() {
    let mut board = fake_board();
    let a = board.create_task("a", "", &ColumnId::from("todo")).unwrap();
    let b = board.create_task("b", "", &ColumnId::from("todo")).unwrap();
    let writes_before = board.gateway().writes.get();

    board.begin_drag(&a.id.to_string());
    let outcome = board
        .end_drag(&a.id.to_string(), Some(&DropTarget::Task(b.id.to_string())))
        .unwrap();
    assert_eq!(outcome, DropOutcome::Unchanged { task_id: a.id });

    let outcome = board
        .end_drag(&a.id.to_string(), Some(&DropTarget::Task(a.id.to_string())))
        .unwrap();
    assert_eq!(outcome, DropOutcome::DroppedOnSelf);
    assert_eq!(board.gateway().writes.get(), writes_before);
}

#[test]
fn drag_onto_card_in_other_column_moves_task() {
    let mut board = fake_board();
    let a = board.create_task("a", "", &ColumnId::from("todo")).unwrap();
    let c = board.create_task("c", "", &ColumnId::from("done")).unwrap();

    let active = board.begin_drag(&a.id.to_string()).map(|task| task.id);
    assert_eq!(active, Some(a.id));

    let outcome = board
        .end_drag(&a.id.to_string(), Some(&DropTarget::Task(c.id.to_string())))
        .unwrap();
    assert_eq!(outcome.label(), "moved");
    assert_eq!(board.store().task(a.id).unwrap().status.as_str(), "done");
    assert_eq!(
        board.gateway().tasks.borrow()[0].status,
        ColumnId::from("done")
    );
}

#[test]
fn load_failure_leaves_store_untouched() {
    struct BrokenColumns;

    impl TaskRepository for BrokenColumns {
        fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
            Ok(Vec::new())
        }
        fn insert_task(&self, _task: &Task) -> RepoResult<()> {
            Ok(())
        }
        fn update_task(&self, _id: TaskId, _patch: &TaskPatch) -> RepoResult<()> {
            Ok(())
        }
        fn delete_task(&self, _id: TaskId) -> RepoResult<()> {
            Ok(())
        }
    }

    impl ColumnRepository for BrokenColumns {
        fn load_all_columns(&self) -> RepoResult<Vec<Column>> {
            Err(RepoError::InvalidData("broken".to_string()))
        }
        fn insert_column(&self, _column: &Column) -> RepoResult<()> {
            Ok(())
        }
        fn delete_column(&self, _id: &ColumnId) -> RepoResult<()> {
            Ok(())
        }
    }

    let mut board = BoardService::new(BrokenColumns);
    let err = board.load().unwrap_err();
    assert!(matches!(err, BoardError::Storage(RepoError::InvalidData(_))));
    assert!(board.store().columns().is_empty());
}

#[test]
fn sqlite_board_survives_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let mut board = BoardService::open(Database::open(&path).unwrap()).unwrap();
    let review = board.add_column("Review").unwrap();
    let task = board
        .create_task("Persist me", "", &review.id)
        .unwrap();
    board.into_gateway().close().unwrap();

    let reopened = BoardService::open(Database::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.store().columns().len(), 4);
    assert_eq!(reopened.store().task(task.id).unwrap().status, review.id);
}
