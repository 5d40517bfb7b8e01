use chrono::{TimeZone, Utc};
use kanban_core::db::open_db_in_memory;
use kanban_core::{
    ColumnId, RepoError, SqliteTaskRepository, Task, TaskPatch, TaskRepository, ValidationError,
};
use uuid::Uuid;

#[test]
fn insert_and_load_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Buy milk", "two litres", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    let loaded = repo.load_all_tasks().unwrap();
    assert_eq!(loaded, vec![task]);
}

#[test]
fn create_task_builds_row_from_input() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo
        .create_task("Write report", "", &ColumnId::from("in-progress"))
        .unwrap();
    assert_eq!(created.status.as_str(), "in-progress");

    let loaded = repo.load_all_tasks().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, created.id);
    assert_eq!(loaded[0].title, "Write report");
}

#[test]
fn create_task_with_empty_title_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo
        .create_task("", "desc", &ColumnId::from("todo"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyTaskTitle)
    ));
    assert!(repo.load_all_tasks().unwrap().is_empty());
}

#[test]
fn reminder_survives_roundtrip_to_second_precision() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let reminder = Utc.with_ymd_and_hms(2025, 2, 14, 18, 30, 45).unwrap();
    let mut task = Task::new("Call mom", "", ColumnId::from("todo")).unwrap();
    task.reminder_at = Some(reminder);
    repo.insert_task(&task).unwrap();

    let loaded = repo.load_all_tasks().unwrap();
    assert_eq!(loaded[0].reminder_at, Some(reminder));
    assert_eq!(
        loaded[0].reminder_at.unwrap().timestamp(),
        reminder.timestamp()
    );
    assert!(loaded[0].completed_at.is_none());
}

#[test]
fn timestamps_are_stored_as_iso_text_and_nulls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::new("Stored", "", ColumnId::from("todo")).unwrap();
    task.completed_at = Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
    repo.insert_task(&task).unwrap();

    let (completed, reminder): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT completedAt, reminderAt FROM tasks WHERE id = ?1",
            [task.id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(completed.as_deref(), Some("2024-12-31T23:59:59.000Z"));
    assert_eq!(reminder, None);
}

#[test]
fn partial_update_writes_only_defined_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Draft", "keep this", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    let completed = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    repo.update_task(
        task.id,
        &TaskPatch {
            title: Some("Final".to_string()),
            status: Some(ColumnId::from("done")),
            completed_at: Some(completed),
            ..TaskPatch::default()
        },
    )
    .unwrap();

    let loaded = &repo.load_all_tasks().unwrap()[0];
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.description, "keep this");
    assert_eq!(loaded.status.as_str(), "done");
    assert_eq!(loaded.completed_at, Some(completed));
    assert_eq!(loaded.created_at, task.created_at);
}

#[test]
fn empty_patch_and_missing_rows_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Untouched", "", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    repo.update_task(task.id, &TaskPatch::default()).unwrap();
    repo.update_task(Uuid::new_v4(), &TaskPatch::status(ColumnId::from("done")))
        .unwrap();
    repo.delete_task(Uuid::new_v4()).unwrap();

    assert_eq!(repo.load_all_tasks().unwrap(), vec![task]);
}

#[test]
fn update_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Named", "", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    let err = repo
        .update_task(
            task.id,
            &TaskPatch {
                title: Some("  ".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.load_all_tasks().unwrap()[0].title, "Named");
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Short lived", "", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    repo.delete_task(task.id).unwrap();
    repo.delete_task(task.id).unwrap();
    assert!(repo.load_all_tasks().unwrap().is_empty());
}

#[test]
fn load_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    for title in ["first", "second", "third"] {
        repo.create_task(title, "", &ColumnId::from("todo")).unwrap();
    }

    let titles: Vec<String> = repo
        .load_all_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn null_description_loads_as_empty_string() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, description, status, createdAt)
         VALUES (?1, 'Legacy', NULL, 'todo', '2024-01-01T00:00:00.000Z');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let loaded = repo.load_all_tasks().unwrap();
    assert_eq!(loaded[0].description, "");
}

#[test]
fn invalid_persisted_rows_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, description, status, createdAt)
         VALUES ('not-a-uuid', 'Broken', '', 'todo', '2024-01-01T00:00:00.000Z');",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let err = repo.load_all_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("tasks.id")));
}

#[test]
fn invalid_timestamp_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, description, status, createdAt)
         VALUES (?1, 'Broken', '', 'todo', 'last tuesday');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let err = repo.load_all_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("createdAt")));
}

#[test]
fn update_rejects_unstorable_reminder() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Far out", "", ColumnId::from("todo")).unwrap();
    repo.insert_task(&task).unwrap();

    let err = repo
        .update_task(
            task.id,
            &TaskPatch {
                reminder_at: Some(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::TimestampOutOfRange { .. })
    ));
    assert!(repo.load_all_tasks().unwrap()[0].reminder_at.is_none());
}

#[test]
fn blank_title_rows_are_skipped_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.create_task("Kept", "", &ColumnId::from("todo")).unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, description, status, createdAt)
         VALUES (?1, '   ', '', 'todo', '2024-01-01T00:00:00.000Z');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let titles: Vec<String> = repo
        .load_all_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["Kept"]);
}
