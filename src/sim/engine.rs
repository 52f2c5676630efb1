//! Simulation engine that runs the sampler and all aggregation stages.

use std::error::Error;
use std::fmt;

use rand::{Rng, rngs::StdRng};
use tracing::{debug, info};

use super::heatmap;
use super::rollup::{self, RollupError};
use super::sampler::ChargePointSampler;
use super::types::{HourlyRecord, SimulationParameters, SimulationResult, SimulationSummary};

/// Failure of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `days * 24` does not fit in `usize`.
    HorizonOverflow {
        /// Requested horizon in days.
        days: usize,
    },
    /// The hourly series could not be rolled up into whole days.
    Rollup(RollupError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HorizonOverflow { days } => {
                write!(f, "engine error: horizon of {days} days overflows the hour count")
            }
            Self::Rollup(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HorizonOverflow { .. } => None,
            Self::Rollup(e) => Some(e),
        }
    }
}

impl From<RollupError> for EngineError {
    fn from(e: RollupError) -> Self {
        Self::Rollup(e)
    }
}

/// Simulation engine owning the run parameters and the sampler.
///
/// Generic over the random source for static dispatch; use
/// [`Engine::seeded`] for reproducible runs and [`Engine::new`] to inject a
/// custom generator. Every run builds fresh records, no state survives
/// between engines.
pub struct Engine<R> {
    params: SimulationParameters,
    sampler: ChargePointSampler<R>,
}

impl Engine<StdRng> {
    /// Creates an engine whose sampler is seeded from `seed`.
    pub fn seeded(params: &SimulationParameters, seed: u64) -> Self {
        Self {
            params: params.clone(),
            sampler: ChargePointSampler::seeded(params, seed),
        }
    }
}

impl<R: Rng> Engine<R> {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `params` - Site parameters and horizon
    /// * `rng` - Random source driving every draw
    pub fn new(params: &SimulationParameters, rng: R) -> Self {
        Self {
            params: params.clone(),
            sampler: ChargePointSampler::new(params, rng),
        }
    }

    /// Samples every charge point for one hour and reduces it to a record.
    pub fn step(&mut self, hour: usize) -> HourlyRecord {
        let samples = self.sampler.sample_hour(self.params.charge_point_count);
        HourlyRecord::from_samples(hour, samples)
    }

    /// Executes all hours of the horizon and returns the aggregated result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HorizonOverflow`] if the hour count of the
    /// horizon does not fit in `usize`, and [`EngineError::Rollup`] if the
    /// hourly series cannot be split into whole days. The engine always
    /// samples whole days, so the latter only surfaces a broken invariant.
    pub fn run(&mut self) -> Result<SimulationResult, EngineError> {
        let total = self
            .params
            .total_hours()
            .ok_or(EngineError::HorizonOverflow {
                days: self.params.days_to_simulate,
            })?;
        debug!(
            charge_points = self.params.charge_point_count,
            probability = self.sampler.probability,
            max_power_kw = self.sampler.max_power_kw,
            hours = total,
            "Sampling charge points"
        );

        let hourly_data: Vec<HourlyRecord> = (0..total).map(|t| self.step(t)).collect();
        let daily_data = rollup::daily(&hourly_data)?;
        let monthly_data = rollup::monthly(&daily_data);
        let heatmap_data = heatmap::project(&daily_data);
        let summary = SimulationSummary::from_records(&hourly_data, self.params.days_to_simulate);

        info!(
            days = summary.days_to_simulate,
            total_energy_kwh = summary.total_energy_charged,
            total_events = summary.total_events,
            peak_kw = summary.peak_power_load,
            "Simulation finished"
        );

        Ok(SimulationResult {
            hourly_data,
            daily_data,
            monthly_data,
            heatmap_data,
            summary,
        })
    }
}

/// Runs one simulation with a borrowed random source.
///
/// # Errors
///
/// See [`Engine::run`].
pub fn simulate<R: Rng>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationResult, EngineError> {
    Engine::new(params, rng).run()
}
