//! REST API for simulation results.
//!
//! Provides read-only endpoints over one precomputed run and a stateless
//! endpoint that runs a fresh simulation per request:
//! - `GET /parameters`: parameters and seed of the precomputed run
//! - `GET /summary`: global totals of the precomputed run
//! - `GET /series`: hourly, daily or monthly series with optional range filtering
//! - `GET /heatmap`: 365-day calendar projection
//! - `POST /simulate`: validate parameters and return a complete new result

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::sim::types::{SimulationParameters, SimulationResult};

pub use types::{ErrorResponse, RunParameters, SeriesQuery, SimulateRequest};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Parameters used for the precomputed run.
    pub parameters: SimulationParameters,
    /// Seed used for the precomputed run.
    pub seed: u64,
    /// Precomputed run result.
    pub result: SimulationResult,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/parameters", get(handlers::get_parameters))
        .route("/summary", get(handlers::get_summary))
        .route("/series", get(handlers::get_series))
        .route("/heatmap", get(handlers::get_heatmap))
        .route("/simulate", post(handlers::post_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
