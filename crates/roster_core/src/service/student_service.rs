//! Caller-facing student operations with sentinel results.
//!
//! # Responsibility
//! - Expose the roster operations without ever returning `Err` or panicking.
//! - Emit one diagnostic per failed operation.
//!
//! # Invariants
//! - A failed operation yields its sentinel (`false`, empty, `None`, `0`,
//!   `0.0`) together with `OutcomeStatus::Failed`.
//! - Empty-table aggregates are `0.0` with `OutcomeStatus::Ok`.

use crate::logging::{sanitize_message, MAX_DIAGNOSTIC_CHARS};
use crate::model::student::{Student, StudentId};
use crate::repo::student_repo::{RepoError, RepoResult, StudentRepository};
use log::{debug, error};

/// Whether the operation reached the store and completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Ok,
    Failed,
}

/// Sentinel value paired with an explicit status.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    value: T,
    status: OutcomeStatus,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            status: OutcomeStatus::Ok,
        }
    }

    pub fn failed(sentinel: T) -> Self {
        Self {
            value: sentinel,
            status: OutcomeStatus::Failed,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }

    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

/// Search mode offered to roster callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Substring match on name.
    Name,
    /// Exact match on department.
    Department,
    /// First exact match on roll number.
    RollNo,
}

/// Aggregates shown together on a statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RosterStats {
    pub total: u64,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
}

/// Sentinel-returning facade over a [`StudentRepository`].
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `true` when the insert statement ran.
    pub fn create(&self, student: &Student) -> Outcome<bool> {
        settle("student_create", self.repo.create(student).map(|()| true), false)
    }

    pub fn list_all(&self) -> Outcome<Vec<Student>> {
        settle("student_list_all", self.repo.list_all(), Vec::new())
    }

    /// `true` when the update statement ran, even if no row matched.
    pub fn update(&self, student: &Student) -> Outcome<bool> {
        settle("student_update", self.repo.update(student).map(|()| true), false)
    }

    /// `true` when the delete statement ran, even if no row matched.
    pub fn delete(&self, id: StudentId) -> Outcome<bool> {
        settle("student_delete", self.repo.delete(id).map(|()| true), false)
    }

    pub fn search_by_name(&self, fragment: &str) -> Outcome<Vec<Student>> {
        settle(
            "student_search_name",
            self.repo.search_by_name(fragment),
            Vec::new(),
        )
    }

    pub fn search_by_department(&self, department: &str) -> Outcome<Vec<Student>> {
        settle(
            "student_search_department",
            self.repo.search_by_department(department),
            Vec::new(),
        )
    }

    pub fn search_by_roll_no(&self, roll_no: &str) -> Outcome<Option<Student>> {
        settle(
            "student_search_roll_no",
            self.repo.find_by_roll_no(roll_no),
            None,
        )
    }

    /// Dispatches to the search matching `field`.
    ///
    /// Roll number results are returned as a zero-or-one element list.
    pub fn search(&self, field: SearchField, query: &str) -> Outcome<Vec<Student>> {
        match field {
            SearchField::Name => self.search_by_name(query),
            SearchField::Department => self.search_by_department(query),
            SearchField::RollNo => {
                let found = self.search_by_roll_no(query);
                let status = found.status();
                let value = found.into_value().into_iter().collect();
                Outcome { value, status }
            }
        }
    }

    pub fn total_count(&self) -> Outcome<u64> {
        settle("student_total_count", self.repo.total_count(), 0)
    }

    pub fn highest_marks(&self) -> Outcome<f64> {
        settle_marks("student_highest_marks", self.repo.highest_marks())
    }

    pub fn lowest_marks(&self) -> Outcome<f64> {
        settle_marks("student_lowest_marks", self.repo.lowest_marks())
    }

    pub fn average_marks(&self) -> Outcome<f64> {
        settle_marks("student_average_marks", self.repo.average_marks())
    }

    /// Gathers all four aggregates; failed if any of them failed.
    pub fn statistics(&self) -> Outcome<RosterStats> {
        let total = self.total_count();
        let highest = self.highest_marks();
        let lowest = self.lowest_marks();
        let average = self.average_marks();

        let failed =
            total.is_failed() || highest.is_failed() || lowest.is_failed() || average.is_failed();
        let stats = RosterStats {
            total: total.into_value(),
            highest: highest.into_value(),
            lowest: lowest.into_value(),
            average: average.into_value(),
        };

        if failed {
            Outcome::failed(stats)
        } else {
            Outcome::ok(stats)
        }
    }
}

fn settle<T>(event: &str, result: RepoResult<T>, sentinel: T) -> Outcome<T> {
    match result {
        Ok(value) => {
            debug!("event={event} module=service status=ok");
            Outcome::ok(value)
        }
        Err(err) => {
            report_failure(event, &err);
            Outcome::failed(sentinel)
        }
    }
}

/// SQL `NULL` from an empty table reads as `0.0`, like a numeric column read.
fn settle_marks(event: &str, result: RepoResult<Option<f64>>) -> Outcome<f64> {
    settle(event, result.map(Option::unwrap_or_default), 0.0)
}

fn report_failure(event: &str, err: &RepoError) {
    let error_code = match err {
        RepoError::Db(db) if db.is_connection() => "connection_error",
        RepoError::Db(_) => "statement_error",
        RepoError::MissingId => "missing_id",
    };
    error!(
        "event={} module=service status=error error_code={} error={}",
        event,
        error_code,
        sanitize_message(&err.to_string(), MAX_DIAGNOSTIC_CHARS)
    );
}

#[cfg(test)]
mod tests {
    use super::{Outcome, OutcomeStatus, SearchField, StudentService};
    use crate::db::ConnectionError;
    use crate::model::student::{Student, StudentId};
    use crate::repo::student_repo::{RepoError, RepoResult, StudentRepository};

    /// Repository double whose store is never reachable.
    struct UnreachableRepository;

    fn offline<T>() -> RepoResult<T> {
        Err(ConnectionError::UnsupportedDriver("offline".to_string()).into())
    }

    impl StudentRepository for UnreachableRepository {
        fn create(&self, _student: &Student) -> RepoResult<()> {
            offline()
        }
        fn list_all(&self) -> RepoResult<Vec<Student>> {
            offline()
        }
        fn update(&self, _student: &Student) -> RepoResult<()> {
            offline()
        }
        fn delete(&self, _id: StudentId) -> RepoResult<()> {
            offline()
        }
        fn search_by_name(&self, _fragment: &str) -> RepoResult<Vec<Student>> {
            offline()
        }
        fn search_by_department(&self, _department: &str) -> RepoResult<Vec<Student>> {
            offline()
        }
        fn find_by_roll_no(&self, _roll_no: &str) -> RepoResult<Option<Student>> {
            offline()
        }
        fn total_count(&self) -> RepoResult<u64> {
            offline()
        }
        fn highest_marks(&self) -> RepoResult<Option<f64>> {
            offline()
        }
        fn lowest_marks(&self) -> RepoResult<Option<f64>> {
            offline()
        }
        fn average_marks(&self) -> RepoResult<Option<f64>> {
            offline()
        }
    }

    #[test]
    fn outcome_accessors_report_status() {
        let ok = Outcome::ok(3_u64);
        assert!(ok.is_ok());
        assert_eq!(*ok.value(), 3);

        let failed = Outcome::failed(0_u64);
        assert!(failed.is_failed());
        assert_eq!(failed.status(), OutcomeStatus::Failed);
        assert_eq!(failed.into_value(), 0);
    }

    #[test]
    fn unreachable_store_yields_sentinels() {
        let service = StudentService::new(UnreachableRepository);
        let student = Student::new("Ada", "R1", "CS", "ada@x.com", "555", 90.0).with_id(1);

        assert_eq!(service.create(&student), Outcome::failed(false));
        assert_eq!(service.update(&student), Outcome::failed(false));
        assert_eq!(service.delete(1), Outcome::failed(false));
        assert_eq!(service.list_all(), Outcome::failed(Vec::new()));
        assert_eq!(service.search_by_name("A"), Outcome::failed(Vec::new()));
        assert_eq!(service.search_by_department("CS"), Outcome::failed(Vec::new()));
        assert_eq!(service.search_by_roll_no("R1"), Outcome::failed(None));
        assert_eq!(service.total_count(), Outcome::failed(0));
        assert_eq!(service.highest_marks(), Outcome::failed(0.0));
        assert_eq!(service.lowest_marks(), Outcome::failed(0.0));
        assert_eq!(service.average_marks(), Outcome::failed(0.0));
    }

    #[test]
    fn roll_no_search_dispatch_keeps_failure_status() {
        let service = StudentService::new(UnreachableRepository);
        let result = service.search(SearchField::RollNo, "R1");
        assert!(result.is_failed());
        assert!(result.value().is_empty());
    }

    #[test]
    fn statistics_fail_when_store_is_unreachable() {
        let service = StudentService::new(UnreachableRepository);
        let stats = service.statistics();
        assert!(stats.is_failed());
        assert_eq!(stats.value().total, 0);
        assert_eq!(stats.value().average, 0.0);
    }

    #[test]
    fn missing_id_error_is_not_a_connection_error() {
        assert!(!RepoError::MissingId.is_connection());
    }
}
