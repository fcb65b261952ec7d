//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD, search and aggregate queries over the `students` table.
//! - Acquire the connection from [`ConnectionProvider`] on every call.
//!
//! # Invariants
//! - Caller values are bound as statement parameters, never spliced into SQL.
//! - Update/delete report statement execution, not affected-row counts.
//! - Aggregates surface SQL `NULL` (empty table) as `None`.

use crate::db::{ConnectionError, ConnectionProvider, DbError};
use crate::model::student::{Student, StudentId};
use rusqlite::{params, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    roll_no,
    department,
    email,
    phone,
    marks
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update was asked for a record that was never persisted.
    MissingId,
}

impl RepoError {
    /// Whether the store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_connection())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingId => {
                write!(f, "student has no id; only persisted records can be updated")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingId => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ConnectionError> for RepoError {
    fn from(value: ConnectionError) -> Self {
        Self::Db(DbError::Connection(value))
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Statement(value))
    }
}

/// Data-access contract for student records.
pub trait StudentRepository {
    /// Inserts the six business fields; any `id` on `student` is ignored.
    fn create(&self, student: &Student) -> RepoResult<()>;
    /// Every row, in store scan order.
    fn list_all(&self) -> RepoResult<Vec<Student>>;
    /// Replaces all business fields of the row keyed by `student.id`.
    fn update(&self, student: &Student) -> RepoResult<()>;
    fn delete(&self, id: StudentId) -> RepoResult<()>;
    /// Rows whose name contains `fragment`, using the store's `LIKE`.
    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Student>>;
    fn search_by_department(&self, department: &str) -> RepoResult<Vec<Student>>;
    /// Lowest-id row with this roll number.
    fn find_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>>;
    fn total_count(&self) -> RepoResult<u64>;
    fn highest_marks(&self) -> RepoResult<Option<f64>>;
    fn lowest_marks(&self) -> RepoResult<Option<f64>>;
    fn average_marks(&self) -> RepoResult<Option<f64>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'p> {
    provider: &'p ConnectionProvider,
}

impl<'p> SqliteStudentRepository<'p> {
    pub fn new(provider: &'p ConnectionProvider) -> Self {
        Self { provider }
    }

    fn query_students<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Student>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn aggregate_marks(&self, sql: &str) -> RepoResult<Option<f64>> {
        let conn = self.provider.acquire()?;
        let value = conn.query_row(sql, [], |row| row.get::<_, Option<f64>>(0))?;
        Ok(value)
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create(&self, student: &Student) -> RepoResult<()> {
        let conn = self.provider.acquire()?;
        conn.execute(
            "INSERT INTO students (
                name,
                roll_no,
                department,
                email,
                phone,
                marks
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                student.name.as_str(),
                student.roll_no.as_str(),
                student.department.as_str(),
                student.email.as_str(),
                student.phone.as_str(),
                student.marks,
            ],
        )?;

        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Student>> {
        self.query_students(&format!("{STUDENT_SELECT_SQL};"), params![])
    }

    fn update(&self, student: &Student) -> RepoResult<()> {
        let id = student.id.ok_or(RepoError::MissingId)?;
        let conn = self.provider.acquire()?;
        conn.execute(
            "UPDATE students
             SET
                name = ?1,
                roll_no = ?2,
                department = ?3,
                email = ?4,
                phone = ?5,
                marks = ?6
             WHERE id = ?7;",
            params![
                student.name.as_str(),
                student.roll_no.as_str(),
                student.department.as_str(),
                student.email.as_str(),
                student.phone.as_str(),
                student.marks,
                id,
            ],
        )?;

        Ok(())
    }

    fn delete(&self, id: StudentId) -> RepoResult<()> {
        let conn = self.provider.acquire()?;
        conn.execute("DELETE FROM students WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Student>> {
        self.query_students(
            &format!("{STUDENT_SELECT_SQL} WHERE name LIKE ?1;"),
            [format!("%{fragment}%")],
        )
    }

    fn search_by_department(&self, department: &str) -> RepoResult<Vec<Student>> {
        self.query_students(
            &format!("{STUDENT_SELECT_SQL} WHERE department = ?1;"),
            [department],
        )
    }

    fn find_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!(
            "{STUDENT_SELECT_SQL}
             WHERE roll_no = ?1
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([roll_no])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn total_count(&self) -> RepoResult<u64> {
        let conn = self.provider.acquire()?;
        let count = conn.query_row("SELECT COUNT(*) FROM students;", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn highest_marks(&self) -> RepoResult<Option<f64>> {
        self.aggregate_marks("SELECT MAX(marks) FROM students;")
    }

    fn lowest_marks(&self) -> RepoResult<Option<f64>> {
        self.aggregate_marks("SELECT MIN(marks) FROM students;")
    }

    fn average_marks(&self) -> RepoResult<Option<f64>> {
        self.aggregate_marks("SELECT AVG(marks) FROM students;")
    }
}

/// Maps one row; `NULL` text reads as empty and `NULL` marks as `0.0`.
fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id: StudentId = row.get("id")?;
    Ok(Student {
        id: Some(id),
        name: text_column(row, "name")?,
        roll_no: text_column(row, "roll_no")?,
        department: text_column(row, "department")?,
        email: text_column(row, "email")?,
        phone: text_column(row, "phone")?,
        marks: row.get::<_, Option<f64>>("marks")?.unwrap_or_default(),
    })
}

fn text_column(row: &Row<'_>, column: &str) -> RepoResult<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}
