//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::series::TimeScale;
use crate::sim::types::SimulationParameters;

/// Accepted charge point counts.
pub const CHARGE_POINTS_RANGE: (usize, usize) = (1, 100);

/// Accepted arrival probability multipliers (percent).
pub const ARRIVAL_PCT_RANGE: (f64, f64) = (20.0, 200.0);

/// Longest accepted simulation horizon (days).
pub const MAX_DAYS: usize = 3650;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `default` preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or pick a built-in preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Charging site parameters.
    #[serde(default)]
    pub site: SiteConfig,
    /// Horizon and random seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Charging site parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Number of charge points (1–100).
    pub charge_points: usize,
    /// Arrival probability multiplier in percent (20–200).
    pub arrival_probability_pct: f64,
    /// Maximum charging power per point (kW, > 0).
    pub charging_power_kw: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            charge_points: 4,
            arrival_probability_pct: 100.0,
            charging_power_kw: 11.0,
        }
    }
}

/// Horizon and random seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// View resolution; also sets the horizon when `days` is absent.
    pub time_scale: TimeScale,
    /// Explicit horizon in days, overriding the time-scale default.
    pub days: Option<usize>,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: TimeScale::Year,
            days: None,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Days to simulate: the explicit override or the time-scale horizon.
    pub fn days_to_simulate(&self) -> usize {
        self.days.unwrap_or_else(|| self.time_scale.default_days())
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.charge_points"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Two small charge points with light traffic, simulated for a year.
    pub fn quiet_street() -> Self {
        Self {
            site: SiteConfig {
                charge_points: 2,
                arrival_probability_pct: 30.0,
                charging_power_kw: 7.4,
            },
            simulation: SimulationConfig::default(),
        }
    }

    /// Large fast-charging depot with saturated arrivals, simulated for a month.
    pub fn busy_depot() -> Self {
        Self {
            site: SiteConfig {
                charge_points: 40,
                arrival_probability_pct: 180.0,
                charging_power_kw: 50.0,
            },
            simulation: SimulationConfig {
                time_scale: TimeScale::Month,
                ..SimulationConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "quiet_street", "busy_depot"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default()),
            "quiet_street" => Ok(Self::quiet_street()),
            "busy_depot" => Ok(Self::busy_depot()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = validate_site(
            "site.",
            self.site.charge_points,
            self.site.arrival_probability_pct,
            self.site.charging_power_kw,
        );
        errors.extend(validate_days("simulation.days", self.simulation.days_to_simulate()));
        errors
    }

    /// Builds engine parameters from this scenario.
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters::new(
            self.site.charge_points,
            self.site.arrival_probability_pct,
            self.site.charging_power_kw,
            self.simulation.days_to_simulate(),
        )
    }
}

/// Validates raw engine parameters the same way a scenario file is validated.
///
/// Field paths use the parameter (wire) names.
pub fn validate_parameters(params: &SimulationParameters) -> Vec<ConfigError> {
    let mut errors = validate_site(
        "",
        params.charge_point_count,
        params.arrival_probability_multiplier,
        params.charging_power_per_point_kw,
    );
    for e in &mut errors {
        e.field = match e.field.as_str() {
            "charge_points" => "chargePointCount".to_string(),
            "arrival_probability_pct" => "arrivalProbabilityMultiplier".to_string(),
            "charging_power_kw" => "chargingPowerPerPointKW".to_string(),
            other => other.to_string(),
        };
    }
    errors.extend(validate_days("daysToSimulate", params.days_to_simulate));
    errors
}

fn validate_days(field: &str, days: usize) -> Option<ConfigError> {
    (days > MAX_DAYS).then(|| ConfigError {
        field: field.to_string(),
        message: format!("must be at most {MAX_DAYS}, got {days}"),
    })
}

fn validate_site(
    prefix: &str,
    charge_points: usize,
    arrival_pct: f64,
    power_kw: f64,
) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let (min_points, max_points) = CHARGE_POINTS_RANGE;
    if !(min_points..=max_points).contains(&charge_points) {
        errors.push(ConfigError {
            field: format!("{prefix}charge_points"),
            message: format!("must be in [{min_points}, {max_points}], got {charge_points}"),
        });
    }

    let (min_pct, max_pct) = ARRIVAL_PCT_RANGE;
    if !(min_pct..=max_pct).contains(&arrival_pct) {
        errors.push(ConfigError {
            field: format!("{prefix}arrival_probability_pct"),
            message: format!("must be in [{min_pct}, {max_pct}], got {arrival_pct}"),
        });
    }

    if !power_kw.is_finite() || power_kw <= 0.0 {
        errors.push(ConfigError {
            field: format!("{prefix}charging_power_kw"),
            message: format!("must be a finite number > 0, got {power_kw}"),
        });
    }

    errors
}
