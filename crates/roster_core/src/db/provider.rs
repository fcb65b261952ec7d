//! Lazily-created, reused store connection.
//!
//! # Responsibility
//! - Open the connection described by [`StoreConfig`] on first use.
//! - Check the cached handle before every hand-out and reopen it when dead.
//! - Close the handle on explicit release.
//!
//! # Invariants
//! - At most one connection is cached per provider.
//! - The provider is `!Sync`; callers share it on a single thread.
//! - Opening never creates a database file.

use super::ConnectionError;
use crate::settings::StoreConfig;
use log::{debug, error, info, warn};
use rusqlite::{Connection, OpenFlags};
use std::cell::{Ref, RefCell};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Store driver selected by `StoreConfig::driver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// Existing SQLite database file at `address`.
    Sqlite,
    /// Private in-memory SQLite database.
    Memory,
}

impl Driver {
    pub fn parse(value: &str) -> Result<Self, ConnectionError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConnectionError::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Owner of the single store connection.
pub struct ConnectionProvider {
    config: StoreConfig,
    slot: RefCell<Option<Connection>>,
    liveness: fn(&Connection) -> bool,
}

impl ConnectionProvider {
    /// Creates a provider without connecting.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            slot: RefCell::new(None),
            liveness: is_alive,
        }
    }

    #[cfg(test)]
    fn with_liveness_check(config: StoreConfig, liveness: fn(&Connection) -> bool) -> Self {
        Self {
            liveness,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns whether a connection is currently cached.
    pub fn is_open(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Returns the cached connection, opening or reopening it as needed.
    ///
    /// The returned guard must be dropped before [`Self::release`] or a
    /// reconnect can take effect.
    ///
    /// # Errors
    /// - `UnsupportedDriver` when the configured driver is unknown.
    /// - `Open` with the driver error when the store cannot be reached.
    /// - `Unavailable` when the slot is still borrowed during a reconnect.
    pub fn acquire(&self) -> Result<Ref<'_, Connection>, ConnectionError> {
        let usable = self.slot.borrow().as_ref().is_some_and(self.liveness);
        if !usable {
            let mut slot = self
                .slot
                .try_borrow_mut()
                .map_err(|_| ConnectionError::Unavailable)?;
            if slot.take().is_some() {
                warn!(
                    "event=db_reconnect module=db status=start driver={} reason=liveness_failed",
                    self.config.driver
                );
            }
            *slot = Some(self.establish()?);
        }

        Ref::filter_map(self.slot.borrow(), Option::as_ref)
            .map_err(|_| ConnectionError::Unavailable)
    }

    /// Closes the cached connection, if any. Close failures are logged only.
    pub fn release(&self) {
        let taken = match self.slot.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => {
                warn!("event=db_close module=db status=error error_code=connection_in_use");
                return;
            }
        };

        let Some(conn) = taken else {
            debug!("event=db_close module=db status=skipped reason=not_open");
            return;
        };

        match conn.close() {
            Ok(()) => info!("event=db_close module=db status=ok"),
            Err((_conn, err)) => warn!(
                "event=db_close module=db status=error error_code=db_close_failed error={}",
                err
            ),
        }
    }

    fn establish(&self) -> Result<Connection, ConnectionError> {
        let started_at = Instant::now();
        let driver = Driver::parse(&self.config.driver).inspect_err(|err| {
            error!(
                "event=db_connect module=db status=error error_code=unsupported_driver error={}",
                err
            );
        })?;
        info!(
            "event=db_connect module=db status=start driver={} address={} user={}",
            driver.as_str(),
            self.config.address,
            self.config.user
        );

        let opened = match driver {
            Driver::Sqlite => Connection::open_with_flags(
                &self.config.address,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
            Driver::Memory => Connection::open_in_memory(),
        }
        .and_then(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(conn)
        });

        match opened {
            Ok(conn) => {
                info!(
                    "event=db_connect module=db status=ok driver={} duration_ms={}",
                    driver.as_str(),
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(source) => {
                error!(
                    "event=db_connect module=db status=error driver={} duration_ms={} \
                     error_code=db_open_failed error={}",
                    driver.as_str(),
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(ConnectionError::Open {
                    address: self.config.address.clone(),
                    source,
                })
            }
        }
    }
}

fn is_alive(conn: &Connection) -> bool {
    conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0)).is_ok()
}
