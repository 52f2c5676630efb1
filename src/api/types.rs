//! API request, query and error types.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::sim::series::TimeScale;
use crate::sim::types::SimulationParameters;

/// Query parameters for the series endpoint.
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// Resolution; defaults to `year` (monthly buckets).
    #[serde(default)]
    pub scale: TimeScale,
    /// First bucket index (inclusive).
    pub from: Option<usize>,
    /// Last bucket index (inclusive).
    pub to: Option<usize>,
}

/// Body of `POST /simulate`: engine parameters plus an optional seed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    #[serde(flatten)]
    pub parameters: SimulationParameters,
    /// Random seed; the server picks one when absent.
    pub seed: Option<u64>,
}

/// Parameters and seed of the run served by the read-only endpoints.
#[derive(Debug, Serialize)]
pub struct RunParameters {
    #[serde(flatten)]
    pub parameters: SimulationParameters,
    pub seed: u64,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Per-field validation failures, when the request was rejected by validation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// One failed validation rule.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ErrorResponse {
    /// Error with a message and no field details.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

impl From<Vec<ConfigError>> for ErrorResponse {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self {
            error: "invalid simulation parameters".to_string(),
            fields: errors
                .into_iter()
                .map(|e| FieldError {
                    field: e.field,
                    message: e.message,
                })
                .collect(),
        }
    }
}
