//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//!
//! # Invariants
//! - A missing database path means an in-memory store.
//! - A missing log level falls back to `default_log_level()`.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "QNA_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "QNA_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "QNA_LOG_DIR";

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `QNA_DB_PATH`, `QNA_LOG_LEVEL` and `QNA_LOG_DIR`.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => value.parse()?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level,
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        })
    }
}
