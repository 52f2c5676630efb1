//! Stochastic EV charging demand simulator for multi-point charging sites.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
/// CSV export of simulation series.
pub mod io;
/// Sampling, aggregation, and summary modules.
pub mod sim;
