use kanban_core::db::open_db_in_memory;
use kanban_core::{
    Column, ColumnId, ColumnRepository, Database, RepoError, SqliteColumnRepository,
    ValidationError,
};

#[test]
fn seeded_columns_load_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteColumnRepository::new(&conn);

    let columns = repo.load_all_columns().unwrap();
    let pairs: Vec<(&str, &str)> = columns
        .iter()
        .map(|column| (column.id.as_str(), column.title.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("todo", "Todo"), ("in-progress", "In Progress"), ("done", "Done")]
    );
}

#[test]
fn create_column_returns_generated_id_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteColumnRepository::new(&conn);

    let created = repo.create_column("Review").unwrap();
    assert_eq!(created.title, "Review");
    assert_ne!(created.id.as_str(), "review");

    let columns = repo.load_all_columns().unwrap();
    assert_eq!(columns.len(), 4);
    assert_eq!(columns.last().unwrap(), &created);
}

#[test]
fn create_column_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteColumnRepository::new(&conn);

    let err = repo.create_column("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyColumnTitle)
    ));
    assert_eq!(repo.load_all_columns().unwrap().len(), 3);
}

#[test]
fn inserting_duplicate_id_is_a_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteColumnRepository::new(&conn);

    let clash = Column::with_id(ColumnId::from("todo"), "Another Todo").unwrap();
    let err = repo.insert_column(&clash).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn delete_column_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteColumnRepository::new(&conn);

    repo.delete_column(&ColumnId::from("done")).unwrap();
    repo.delete_column(&ColumnId::from("done")).unwrap();
    repo.delete_column(&ColumnId::from("never-existed")).unwrap();

    let ids: Vec<String> = repo
        .load_all_columns()
        .unwrap()
        .into_iter()
        .map(|column| column.id.to_string())
        .collect();
    assert_eq!(ids, vec!["todo", "in-progress"]);
}

#[test]
fn database_handle_acts_as_column_gateway() {
    let database = Database::open_in_memory().unwrap();
    let created = database.create_column("Blocked").unwrap();

    let columns = database.load_all_columns().unwrap();
    assert!(columns.iter().any(|column| column.id == created.id));
}
