//! Persistence contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the student data-access contract as a trait.
//! - Keep SQL text and row mapping inside core.
//!
//! # Invariants
//! - Every operation runs exactly one parameterized statement.
//! - Repository errors are typed; sentinel conversion happens in `service`.

pub mod student_repo;
