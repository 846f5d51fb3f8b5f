//! Configuration management for the Contacts API.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honored if present.

use crate::domain::birthday_window::{DAYS_IN_YEAR, DEFAULT_WINDOW_DAYS};
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Contacts API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file (from `DATABASE_URL`)
    pub database_path: PathBuf,

    /// Address the HTTP server binds to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Per-call storage timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Look-ahead of the upcoming-birthdays query in days (default: 7)
    pub upcoming_birthday_days: u32,

    /// Page size used when the client sends no limit (default: 100)
    pub default_page_limit: usize,

    /// Largest page size a client may request (default: 200)
    pub max_page_limit: usize,

    /// Log filter used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DATABASE_URL`: `sqlite://path`, `sqlite:path`, or a plain file path
    ///
    /// Optional environment variables:
    /// - `BIND_ADDR`: listen address (default: 127.0.0.1:8000)
    /// - `REQUEST_TIMEOUT`: storage timeout in seconds (default: 10)
    /// - `UPCOMING_BIRTHDAY_DAYS`: birthday look-ahead (default: 7)
    /// - `DEFAULT_PAGE_LIMIT`: default list page size (default: 100)
    /// - `MAX_PAGE_LIMIT`: maximum list page size (default: 200)
    /// - `LOG_LEVEL`: logging filter (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;
        let database_path = Self::parse_database_url(&database_url)?;

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(val) => val.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "BIND_ADDR".to_string(),
                reason: format!("Must be a socket address like 127.0.0.1:8000, got: {}", val),
            })?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 8000)),
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let upcoming_birthday_days = Self::parse_env_u32("UPCOMING_BIRTHDAY_DAYS", DEFAULT_WINDOW_DAYS)?;
        if !(1..=DAYS_IN_YEAR).contains(&upcoming_birthday_days) {
            return Err(ConfigError::InvalidValue {
                var: "UPCOMING_BIRTHDAY_DAYS".to_string(),
                reason: "Must be between 1 and 365".to_string(),
            });
        }

        let max_page_limit = Self::parse_env_usize("MAX_PAGE_LIMIT", 200)?;
        if max_page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_PAGE_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let default_page_limit = Self::parse_env_usize("DEFAULT_PAGE_LIMIT", 100)?;
        if default_page_limit == 0 || default_page_limit > max_page_limit {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_PAGE_LIMIT".to_string(),
                reason: format!("Must be between 1 and MAX_PAGE_LIMIT ({})", max_page_limit),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            database_path,
            bind_addr,
            request_timeout,
            upcoming_birthday_days,
            default_page_limit,
            max_page_limit,
            log_level,
        })
    }

    /// Per-call storage timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Turn a connection string into a database file path.
    ///
    /// In-memory databases are rejected: every store call opens its own
    /// connection, so an in-memory database would be empty on each call.
    pub fn parse_database_url(url: &str) -> ConfigResult<PathBuf> {
        let trimmed = url.trim();
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if path.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }
        if path == ":memory:" || path.contains("mode=memory") {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "In-memory databases are not supported".to_string(),
            });
        }

        Ok(PathBuf::from(path))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("contacts.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            request_timeout: 10,
            upcoming_birthday_days: DEFAULT_WINDOW_DAYS,
            default_page_limit: 100,
            max_page_limit: 200,
            log_level: "info".to_string(),
        }
    }
}
