//! Contacts API - a small contact-management HTTP service backed by SQLite.
//!
//! Clients create, read, update, and delete contacts, search them by text,
//! and ask which contacts have a birthday coming up.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects and the birthday window predicate
//! - **models**: The `Contact` record and request payloads
//! - **error**: Error types per layer
//! - **config**: Configuration management from environment variables
//! - **metrics**: Lock-free counters for store calls
//! - **repositories**: The contact store contract and its SQLite implementation
//! - **services**: Validation and business rules over the store
//! - **server**: Axum router and handlers

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::{BirthdayWindow, Clock, ContactId, FixedClock, SystemClock, ValidationError};
pub use error::{ConfigError, ServiceError, StoreError};
pub use metrics::{Metrics, MetricsSummary, StoreTimer};
pub use models::{Contact, ContactFields, ContactPayload, ContactUpdatePayload};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use server::{build_router, AppState};
pub use services::{ContactService, ContactServiceImpl, ServiceSettings};
