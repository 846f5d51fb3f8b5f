//! HTTP server for the Contacts API.
//!
//! Routes map one-to-one onto `ContactService` operations; every body is
//! JSON and every error renders as `{"detail": "..."}`.

pub mod handlers;
mod request_tracing;
mod response;

use crate::metrics::Metrics;
use crate::services::ContactService;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Largest request body accepted.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>, metrics: Metrics) -> Self {
        Self { service, metrics }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let contacts = Router::new()
        .route(
            "/contacts",
            get(handlers::list_contacts)
                .post(handlers::create_contact)
                .put(handlers::update_contact),
        )
        .route(
            "/contacts/upcoming_birthdays",
            get(handlers::upcoming_birthdays),
        )
        .route("/contacts/find/:text", get(handlers::find_contacts))
        .route(
            "/contacts/:contact_id",
            get(handlers::get_contact).delete(handlers::remove_contact),
        );

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", contacts)
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Serve `state` on `listener` until SIGINT/SIGTERM.
pub async fn run_server(listener: TcpListener, state: AppState) -> Result<()> {
    let app = build_router(state);
    info!(addr = %listener.local_addr()?, "Contacts API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Contacts API stopped accepting connections");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
