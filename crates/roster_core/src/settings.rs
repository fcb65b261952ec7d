//! Store connection and logging settings.
//!
//! # Responsibility
//! - Describe the fixed store target (driver, address, credential pair).
//! - Layer an optional TOML file and `ROSTER_*` environment variables for
//!   both store and logging keys.
//!
//! # Invariants
//! - Settings are read once and stay constant for the process lifetime.
//! - The password never appears in `Debug` output.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DRIVER: &str = "sqlite";
pub const DEFAULT_ADDRESS: &str = "studentmanagement.sqlite3";
pub const DEFAULT_USER: &str = "root";
const ENV_PREFIX: &str = "ROSTER";

/// Target of the single store connection.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Driver identifier, `sqlite` or `memory`.
    pub driver: String,
    /// Database file path for `sqlite`; ignored by `memory`.
    pub address: String,
    pub user: String,
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("driver", &self.driver)
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    /// Store config targeting an existing SQLite file.
    pub fn sqlite(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Store config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            driver: "memory".to_string(),
            address: ":memory:".to_string(),
            ..Self::default()
        }
    }

    /// Loads settings from an optional TOML file, then `ROSTER_*` env vars.
    ///
    /// Missing keys fall back to [`StoreConfig::default`]. A file path that
    /// does not exist is an error; pass `None` to skip the file layer.
    ///
    /// # Errors
    /// - Returns the `config` error when the file cannot be parsed or a value
    ///   has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        layered(path)?.try_deserialize::<StoreConfig>()
    }
}

fn layered(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
}

/// Logging bootstrap settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// Rolling file directory; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LogKeys {
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

impl LogSettings {
    /// File logging into `log_dir` at the build-mode default level.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: Some(log_dir.into()),
            ..Self::stderr()
        }
    }

    /// Stderr-only logging at the build-mode default level.
    pub fn stderr() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Reads `log_level` and `log_dir` from the same layers as
    /// [`StoreConfig::load`] (`ROSTER_LOG_LEVEL`, `ROSTER_LOG_DIR`).
    ///
    /// # Errors
    /// - Returns the `config` error when the file cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let keys = layered(path)?.try_deserialize::<LogKeys>()?;
        let defaults = Self::stderr();
        Ok(Self {
            level: keys.log_level.unwrap_or(defaults.level),
            log_dir: keys.log_dir.filter(|dir| !dir.as_os_str().is_empty()),
        })
    }
}
