//! CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                          | Default         |
//! |-----------------------------------|-----------------|
//! | `VOUCHER_DB_PATH`                 | `./vouchers.db` |
//! | `VOUCHER_DB_MAX_CONNECTIONS`      | `5`             |
//! | `VOUCHER_DB_CONNECT_TIMEOUT_SECS` | `30`            |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use voucher_db::DbConfig;

/// Runtime configuration of the `voucher` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// How long to wait for a pooled connection
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = AppConfig {
            db_path: lookup("VOUCHER_DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./vouchers.db")),

            max_connections: lookup("VOUCHER_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VOUCHER_DB_MAX_CONNECTIONS".to_string()))?,

            connect_timeout_secs: lookup("VOUCHER_DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("VOUCHER_DB_CONNECT_TIMEOUT_SECS".to_string())
                })?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "VOUCHER_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Replaces the database path (the `--db` flag).
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }

    /// Pool settings for [`voucher_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone())
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
