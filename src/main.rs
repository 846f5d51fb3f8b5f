//! Contacts API - Main entry point
//!
//! Loads configuration, opens the SQLite contact store, and serves the HTTP
//! API until SIGINT/SIGTERM.

use anyhow::Result;
use contacts_api::repositories::{ContactRepository, SqliteContactRepository};
use contacts_api::services::{ContactService, ContactServiceImpl, ServiceSettings};
use contacts_api::{AppState, Clock, Config, SystemClock};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        database = %config.database_path.display(),
        timeout_secs = config.request_timeout,
        "Opening contact store"
    );
    let store = SqliteContactRepository::open(&config.database_path, config.store_timeout()).await?;
    let metrics = store.metrics().clone();

    let repository = Arc::new(store) as Arc<dyn ContactRepository>;
    let clock = Arc::new(SystemClock) as Arc<dyn Clock>;
    let service = Arc::new(ContactServiceImpl::new(
        repository,
        clock,
        ServiceSettings::from(&config),
    )) as Arc<dyn ContactService>;

    info!(
        "Upcoming birthday window: {} days, page limit: {} (max {})",
        config.upcoming_birthday_days, config.default_page_limit, config.max_page_limit
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    contacts_api::server::run_server(listener, AppState::new(service, metrics)).await?;

    info!("Contacts API shutdown complete");
    Ok(())
}
