//! Error types for the Contacts API.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Each layer owns one enum: configuration, the contact store, and the service
//! boundary that the HTTP layer renders.

use crate::domain::ValidationError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur inside the contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No contact with the given id exists
    #[error("Contact {0} not found")]
    NotFound(i64),

    /// SQLite rejected the statement or the connection failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The storage call did not finish within the configured bound
    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),

    /// The blocking task running the storage call panicked or was cancelled
    #[error("Storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Whether this error is a storage failure (as opposed to a missing row).
    pub fn is_persistence(&self) -> bool {
        !matches!(self, StoreError::NotFound(_))
    }
}

/// Errors surfaced by the contact service to its callers.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request body, path, or query was malformed
    #[error("{0}")]
    BadRequest(String),

    /// Input failed validation before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The lookup yielded nothing
    #[error("{0}")]
    NotFound(String),

    /// The store failed; the message is safe to show to clients
    #[error("{0}")]
    OperationFailed(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
