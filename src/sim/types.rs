//! Core simulation types: run parameters, per-bucket records, and the result bundle.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hours in one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Nominal month length used for the monthly rollup.
pub const DAYS_PER_MONTH: usize = 30;

/// Number of calendar days covered by the heatmap, independent of the horizon.
pub const HEATMAP_DAYS: usize = 365;

/// First calendar day of the heatmap projection.
pub const HEATMAP_START: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("heatmap reference date must be valid"),
};

/// Site and horizon parameters for one simulation run.
///
/// The engine is total over any value of this struct; range checks
/// (charge point count, percentage bounds) belong to the caller, see
/// [`crate::config::ScenarioConfig::validate`].
///
/// # Examples
///
/// ```
/// use ev_demand_sim::sim::types::SimulationParameters;
///
/// let params = SimulationParameters::new(4, 100.0, 11.0, 30);
/// assert_eq!(params.total_hours(), Some(720));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Number of independent charging stalls.
    pub charge_point_count: usize,
    /// Per-hour arrival likelihood in percent; values above 100 saturate.
    pub arrival_probability_multiplier: f64,
    /// Exclusive upper bound of a single point's power draw (kW).
    #[serde(rename = "chargingPowerPerPointKW")]
    pub charging_power_per_point_kw: f64,
    /// Simulation horizon in whole days; zero yields empty aggregates.
    pub days_to_simulate: usize,
}

impl SimulationParameters {
    /// Creates a parameter set.
    ///
    /// # Arguments
    ///
    /// * `charge_point_count` - Number of charge points at the site
    /// * `arrival_probability_multiplier` - Arrival likelihood as a percentage
    /// * `charging_power_per_point_kw` - Exclusive upper bound for a point's draw (kW)
    /// * `days_to_simulate` - Number of whole days to simulate
    pub fn new(
        charge_point_count: usize,
        arrival_probability_multiplier: f64,
        charging_power_per_point_kw: f64,
        days_to_simulate: usize,
    ) -> Self {
        Self {
            charge_point_count,
            arrival_probability_multiplier,
            charging_power_per_point_kw,
            days_to_simulate,
        }
    }

    /// Total number of simulated hours across the horizon, `None` on overflow.
    pub fn total_hours(&self) -> Option<usize> {
        self.days_to_simulate.checked_mul(HOURS_PER_DAY)
    }
}

/// Site-wide totals for one simulated hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    /// Sequential hour index starting at 0.
    pub hour: usize,
    /// Power drawn by each charge point (kW), ordered by point index.
    pub power_by_point: Vec<u64>,
    /// Sum of `power_by_point`.
    pub total_power: u64,
    /// Number of points drawing non-zero power.
    pub event_count: usize,
}

/// Totals for one simulated day (24 contiguous hours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// 1-based day number.
    pub day: usize,
    pub total_power: u64,
    pub event_count: usize,
}

/// Totals for one nominal 30-day month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    /// 1-based month number.
    pub month: usize,
    /// Simulated days folded into this bucket (1 to 30; only the last may be short).
    pub days: usize,
    pub total_power: u64,
    pub event_count: usize,
}

/// One calendar day of the heatmap projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub event_count: usize,
    pub total_power: u64,
}

/// Global reductions over a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    /// Sum of hourly total power (kWh at hourly resolution).
    pub total_energy_charged: u64,
    /// Number of point-hours with non-zero draw.
    pub total_events: usize,
    /// Highest hourly site load (kW), 0 for an empty run.
    pub peak_power_load: u64,
    /// `floor(total_events / days_to_simulate)`, 0 for an empty run.
    pub average_events_per_day: usize,
    pub days_to_simulate: usize,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Summary ---")?;
        writeln!(f, "Days simulated:        {}", self.days_to_simulate)?;
        writeln!(f, "Total energy charged:  {} kWh", self.total_energy_charged)?;
        writeln!(f, "Total events:          {}", self.total_events)?;
        writeln!(f, "Peak power load:       {} kW", self.peak_power_load)?;
        write!(f, "Average events/day:    {}", self.average_events_per_day)
    }
}

/// Complete output of one engine run.
///
/// Serializes to the flat wire shape consumed by dashboards: the four data
/// series followed by the summary fields at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub hourly_data: Vec<HourlyRecord>,
    pub daily_data: Vec<DailyRecord>,
    pub monthly_data: Vec<MonthlyRecord>,
    pub heatmap_data: Vec<HeatmapEntry>,
    #[serde(flatten)]
    pub summary: SimulationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_hours_scales_with_days() {
        assert_eq!(SimulationParameters::new(1, 50.0, 7.0, 0).total_hours(), Some(0));
        assert_eq!(SimulationParameters::new(1, 50.0, 7.0, 3).total_hours(), Some(72));
        assert_eq!(
            SimulationParameters::new(1, 50.0, 7.0, usize::MAX / 2).total_hours(),
            None
        );
    }

    #[test]
    fn heatmap_start_is_january_first() {
        assert_eq!(HEATMAP_START.to_string(), "2024-01-01");
    }

    #[test]
    fn parameters_use_camel_case_wire_names() {
        let json = r#"{
            "chargePointCount": 4,
            "arrivalProbabilityMultiplier": 120,
            "chargingPowerPerPointKW": 11.5,
            "daysToSimulate": 45
        }"#;
        let params: SimulationParameters =
            serde_json::from_str(json).expect("parameters should deserialize");
        assert_eq!(params, SimulationParameters::new(4, 120.0, 11.5, 45));
    }

    #[test]
    fn result_flattens_summary_fields() {
        let result = SimulationResult {
            hourly_data: Vec::new(),
            daily_data: Vec::new(),
            monthly_data: Vec::new(),
            heatmap_data: Vec::new(),
            summary: SimulationSummary {
                total_energy_charged: 10,
                total_events: 3,
                peak_power_load: 7,
                average_events_per_day: 3,
                days_to_simulate: 1,
            },
        };
        let json = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(json["totalEnergyCharged"], 10);
        assert_eq!(json["peakPowerLoad"], 7);
        assert!(json.get("summary").is_none());
        assert!(json["hourlyData"].is_array());
    }

    #[test]
    fn heatmap_date_serializes_as_iso_string() {
        let entry = HeatmapEntry {
            date: HEATMAP_START,
            event_count: 2,
            total_power: 9,
        };
        let json = serde_json::to_value(&entry).expect("entry should serialize");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["eventCount"], 2);
    }

    #[test]
    fn summary_display_does_not_panic() {
        let summary = SimulationSummary {
            total_energy_charged: 0,
            total_events: 0,
            peak_power_load: 0,
            average_events_per_day: 0,
            days_to_simulate: 0,
        };
        assert!(format!("{summary}").contains("Peak power load"));
    }
}
