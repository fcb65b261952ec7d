//! Expected shape of the `students` table.
//!
//! The provider and repository assume this table already exists. The
//! installer below is for test fixtures and operator bootstrap only.

use rusqlite::Connection;

pub const STUDENTS_TABLE: &str = "students";

pub const STUDENTS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    roll_no TEXT NOT NULL,
    department TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    marks REAL NOT NULL
);";

/// Creates the `students` table when missing.
pub fn install_students_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(STUDENTS_TABLE_SQL)
}

/// Returns whether the `students` table exists on `conn`.
pub fn students_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [STUDENTS_TABLE],
        |row| row.get(0),
    )
}
