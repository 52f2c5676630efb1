//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::{debug, warn};

use super::AppState;
use super::types::{ErrorResponse, RunParameters, SeriesQuery, SimulateRequest};
use crate::config::validate_parameters;
use crate::sim::engine::Engine;
use crate::sim::series::SeriesPoint;
use crate::sim::types::{HeatmapEntry, SimulationResult, SimulationSummary};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the summary of the precomputed run.
///
/// `GET /summary` → 200 + `SimulationSummary` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SimulationSummary> {
    Json(state.result.summary.clone())
}

/// Returns the parameters and seed of the precomputed run.
///
/// `GET /parameters` → 200 + `RunParameters` JSON
pub async fn get_parameters(State(state): State<Arc<AppState>>) -> Json<RunParameters> {
    Json(RunParameters {
        parameters: state.parameters.clone(),
        seed: state.seed,
    })
}

/// Returns one aggregate series, optionally filtered by bucket index.
///
/// `GET /series?scale=month` → 200 + daily `Vec<SeriesPoint>` JSON
/// `GET /series?scale=day&from=N&to=M` → filtered range (inclusive)
/// `GET /series?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<SeriesPoint>>, ApiError> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(format!(
                "`from` ({from}) must be <= `to` ({to})"
            ))),
        ));
    }

    let points: Vec<SeriesPoint> = state
        .result
        .series(query.scale)
        .into_iter()
        .filter(|p| p.index >= from && p.index <= to)
        .collect();

    Ok(Json(points))
}

/// Returns the 365-day heatmap projection of the precomputed run.
///
/// `GET /heatmap` → 200 + `Vec<HeatmapEntry>` JSON
pub async fn get_heatmap(State(state): State<Arc<AppState>>) -> Json<Vec<HeatmapEntry>> {
    Json(state.result.heatmap_data.clone())
}

/// Validates the request parameters and runs a fresh simulation.
///
/// `POST /simulate` → 200 + `SimulationResult` JSON
/// invalid parameters → 400 + `ErrorResponse` with per-field details
pub async fn post_simulate(
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>, ApiError> {
    let errors = validate_parameters(&request.parameters);
    if !errors.is_empty() {
        warn!(n_errors = errors.len(), "Rejected simulation request");
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::from(errors))));
    }

    let seed = request.seed.unwrap_or_else(rand::random);
    debug!(seed, "Running requested simulation");

    // CPU-bound: runs on the blocking pool.
    let parameters = request.parameters;
    let result = tokio::task::spawn_blocking(move || Engine::seeded(&parameters, seed).run())
        .await
        .map_err(internal_error)?
        .map_err(internal_error)?;

    Ok(Json(result))
}

fn internal_error(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::message(e.to_string())),
    )
}
