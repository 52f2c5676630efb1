/// Simulation engine driving sampling and aggregation.
pub mod engine;
/// Calendar heatmap projection.
pub mod heatmap;
pub mod hourly;
/// Daily and monthly rollups.
pub mod rollup;
/// Per-point Bernoulli-gated power sampling.
pub mod sampler;
pub mod series;
pub mod summary;
pub mod types;
