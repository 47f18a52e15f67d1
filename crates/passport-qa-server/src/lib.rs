//! Passport QA Server - HTTP API for passport photo validation.
//!
//! Serves the country spec catalogue and validates uploaded photos:
//!
//! - `GET /countries` lists country names
//! - `GET /specs/{country}` returns one country's requirements
//! - `POST /validate/{country}` validates the raw photo in the body
//! - `GET /health` is a liveness probe

pub mod error;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use state::{AppState, DEFAULT_MAX_UPLOAD_BYTES};

/// Builds the router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/countries", get(routes::list_countries))
        .route("/specs/:country", get(routes::get_spec))
        .route(
            "/validate/:country",
            post(routes::validate_photo).layer(body_limit),
        )
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
