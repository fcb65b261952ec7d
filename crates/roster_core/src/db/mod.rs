//! Store connection lifecycle and the store-level error taxonomy.
//!
//! # Responsibility
//! - Own the single lazily-created connection to the student store.
//! - Separate "could not reach the store" from "a statement failed".
//!
//! # Invariants
//! - No code path hands out a connection that failed its liveness check.
//! - The `students` table is never created implicitly by this module.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod provider;
pub mod schema;

pub use provider::{ConnectionProvider, Driver};

/// Failure to obtain a usable connection.
#[derive(Debug)]
pub enum ConnectionError {
    UnsupportedDriver(String),
    Open {
        address: String,
        source: rusqlite::Error,
    },
    /// The cached slot was empty right after a successful open.
    Unavailable,
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedDriver(driver) => {
                write!(f, "unsupported store driver `{driver}`; expected sqlite|memory")
            }
            Self::Open { address, source } => {
                write!(f, "cannot open store at `{address}`: {source}")
            }
            Self::Unavailable => write!(f, "store connection is unavailable"),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::UnsupportedDriver(_) | Self::Unavailable => None,
        }
    }
}

/// Store error: either no connection, or a failed statement on a live one.
#[derive(Debug)]
pub enum DbError {
    Connection(ConnectionError),
    Statement(rusqlite::Error),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "connection error: {err}"),
            Self::Statement(err) => write!(f, "statement error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Statement(err) => Some(err),
        }
    }
}

impl From<ConnectionError> for DbError {
    fn from(value: ConnectionError) -> Self {
        Self::Connection(value)
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Statement(value)
    }
}
