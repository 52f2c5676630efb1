//! Post-hoc summary computation from hourly records.

use super::types::{HourlyRecord, SimulationSummary};

impl SimulationSummary {
    /// Reduces the hourly records of a run into global totals.
    ///
    /// Computed from the same records that feed the daily rollup, so
    /// `total_energy_charged` and `total_events` always equal the sums of
    /// the daily series.
    ///
    /// # Arguments
    ///
    /// * `hourly` - Complete hourly records of the run
    /// * `days_to_simulate` - Horizon used for the per-day average
    ///
    /// # Returns
    ///
    /// A summary where peak and average are 0 for an empty run.
    pub fn from_records(hourly: &[HourlyRecord], days_to_simulate: usize) -> Self {
        let mut total_energy_charged = 0_u64;
        let mut total_events = 0_usize;
        let mut peak_power_load = 0_u64;

        for h in hourly {
            total_energy_charged += h.total_power;
            total_events += h.event_count;
            peak_power_load = peak_power_load.max(h.total_power);
        }

        let average_events_per_day = total_events.checked_div(days_to_simulate).unwrap_or(0);

        Self {
            total_energy_charged,
            total_events,
            peak_power_load,
            average_events_per_day,
            days_to_simulate,
        }
    }
}
