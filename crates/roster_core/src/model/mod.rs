//! Domain model for the student roster.
//!
//! # Invariants
//! - A record without an id has never been persisted.
//! - Ids are assigned by the store and never rewritten by core.

pub mod student;
