//! Application configuration loaded from environment variables.

use std::env;

use postboard_infra::{DatabaseConfig, StorageBackend, StorageError};

const DEFAULT_DATABASE_URL: &str = "sqlite://postboard.db?mode=rwc";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut database = DatabaseConfig::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        );
        if let Some(max) = parse_var("DB_MAX_CONNECTIONS")? {
            database.max_connections = max;
        }
        if let Some(min) = parse_var("DB_MIN_CONNECTIONS")? {
            database.min_connections = min;
        }

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(name) => name.parse()?,
            Err(_) => StorageBackend::default(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT")?.unwrap_or(8080),
            database,
            storage,
        })
    }
}

/// Parse an optional variable; present but malformed is an error.
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(None),
    }
}
