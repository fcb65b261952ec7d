use roster_core::db::schema::{install_students_table, students_table_exists};
use roster_core::{
    ConnectionError, ConnectionProvider, DbError, Outcome, RepoError, SqliteStudentRepository,
    StoreConfig, Student, StudentRepository, StudentService,
};
use rusqlite::Connection;

#[test]
fn provider_connects_lazily() {
    let provider = ConnectionProvider::new(StoreConfig::in_memory());
    assert!(!provider.is_open());

    let conn = provider.acquire().unwrap();
    assert!(conn.is_autocommit());
    drop(conn);
    assert!(provider.is_open());
}

#[test]
fn provider_reuses_the_same_handle() {
    let provider = ConnectionProvider::new(StoreConfig::in_memory());

    {
        let conn = provider.acquire().unwrap();
        install_students_table(&conn).unwrap();
    }

    let conn = provider.acquire().unwrap();
    assert!(students_table_exists(&conn).unwrap());
}

#[test]
fn release_closes_and_next_acquire_reconnects() {
    let provider = ConnectionProvider::new(StoreConfig::in_memory());

    {
        let conn = provider.acquire().unwrap();
        install_students_table(&conn).unwrap();
    }
    provider.release();
    assert!(!provider.is_open());

    // A fresh in-memory database has no tables.
    let conn = provider.acquire().unwrap();
    assert!(!students_table_exists(&conn).unwrap());
}

#[test]
fn release_is_idempotent() {
    let provider = ConnectionProvider::new(StoreConfig::in_memory());
    provider.release();

    drop(provider.acquire().unwrap());
    provider.release();
    provider.release();
    assert!(!provider.is_open());
}

#[test]
fn missing_database_file_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sqlite3");
    let provider = ConnectionProvider::new(StoreConfig::sqlite(path.to_str().unwrap()));

    let err = provider.acquire().unwrap_err();
    assert!(matches!(
        err,
        ConnectionError::Open { ref address, .. } if address.ends_with("absent.sqlite3")
    ));
    assert!(!path.exists());
    assert!(!provider.is_open());
}

#[test]
fn unsupported_driver_is_a_connection_error() {
    let config = StoreConfig {
        driver: "mysql".to_string(),
        ..StoreConfig::default()
    };
    let provider = ConnectionProvider::new(config);

    let err = provider.acquire().unwrap_err();
    assert!(matches!(err, ConnectionError::UnsupportedDriver(ref driver) if driver == "mysql"));
    assert!(err.to_string().contains("mysql"));
}

#[test]
fn unreachable_store_yields_sentinels_for_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("roster.sqlite3");
    let provider = ConnectionProvider::new(StoreConfig::sqlite(path.to_str().unwrap()));
    let service = StudentService::new(SqliteStudentRepository::new(&provider));
    let student = Student::new("Jane Doe", "R100", "CS", "jane@x.com", "555-0100", 88.5);

    assert_eq!(service.create(&student), Outcome::failed(false));
    assert_eq!(service.update(&student.clone().with_id(1)), Outcome::failed(false));
    assert_eq!(service.delete(1), Outcome::failed(false));
    assert_eq!(service.list_all(), Outcome::failed(Vec::new()));
    assert_eq!(service.search_by_name("Jane"), Outcome::failed(Vec::new()));
    assert_eq!(service.search_by_department("CS"), Outcome::failed(Vec::new()));
    assert_eq!(service.search_by_roll_no("R100"), Outcome::failed(None));
    assert_eq!(service.total_count(), Outcome::failed(0));
    assert_eq!(service.highest_marks(), Outcome::failed(0.0));
    assert_eq!(service.lowest_marks(), Outcome::failed(0.0));
    assert_eq!(service.average_marks(), Outcome::failed(0.0));
}

#[test]
fn unreachable_store_surfaces_connection_error_from_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sqlite3");
    let provider = ConnectionProvider::new(StoreConfig::sqlite(path.to_str().unwrap()));
    let repo = SqliteStudentRepository::new(&provider);

    let err = repo.list_all().unwrap_err();
    assert!(err.is_connection());
}

#[test]
fn missing_table_is_a_statement_error() {
    let provider = ConnectionProvider::new(StoreConfig::in_memory());
    let repo = SqliteStudentRepository::new(&provider);

    let err = repo.total_count().unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Statement(_))));
    assert!(!err.is_connection());

    let service = StudentService::new(SqliteStudentRepository::new(&provider));
    assert_eq!(service.list_all(), Outcome::failed(Vec::new()));
    assert!(provider.is_open());
}

#[test]
fn provider_never_creates_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.sqlite3");
    drop(Connection::open(&path).unwrap());

    let provider = ConnectionProvider::new(StoreConfig::sqlite(path.to_str().unwrap()));
    let conn = provider.acquire().unwrap();
    assert!(!students_table_exists(&conn).unwrap());
}
