//! Core data access for the student roster.
//! Owns the store connection, the student queries and their sentinel surface.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod settings;

pub use db::{ConnectionError, ConnectionProvider, DbError, Driver};
pub use logging::{default_log_level, flush_logs, init_logging, logging_status};
pub use model::student::{Student, StudentId};
pub use repo::student_repo::{RepoError, RepoResult, SqliteStudentRepository, StudentRepository};
pub use service::student_service::{
    Outcome, OutcomeStatus, RosterStats, SearchField, StudentService,
};
pub use settings::{LogSettings, StoreConfig};

/// Minimal health-check API for callers wiring the core in.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
