//! Time-scale selection of the aggregate series a dashboard plots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{DAYS_PER_MONTH, HEATMAP_DAYS, SimulationResult};

/// Resolution a caller wants to view results at.
///
/// `Day` shows hourly buckets, `Month` daily buckets, `Year` monthly buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Day,
    Month,
    #[default]
    Year,
}

impl TimeScale {
    /// Available scale names.
    pub const NAMES: &[&str] = &["day", "month", "year"];

    /// Nominal horizon (days) for this scale: 1, 30 or 365.
    pub fn default_days(self) -> usize {
        match self {
            Self::Day => 1,
            Self::Month => DAYS_PER_MONTH,
            Self::Year => HEATMAP_DAYS,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        })
    }
}

impl FromStr for TimeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!(
                "unknown time scale \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// One bar of a selected series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Hour (0-based), day (1-based) or month (1-based), depending on scale.
    pub index: usize,
    pub event_count: usize,
    pub total_power: u64,
}

impl fmt::Display for SeriesPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:>4} | events={:>5}  energy={:>7} kWh",
            self.index, self.event_count, self.total_power
        )
    }
}

impl SimulationResult {
    /// Returns the aggregate series matching `scale`.
    pub fn series(&self, scale: TimeScale) -> Vec<SeriesPoint> {
        match scale {
            TimeScale::Day => self
                .hourly_data
                .iter()
                .map(|h| SeriesPoint {
                    index: h.hour,
                    event_count: h.event_count,
                    total_power: h.total_power,
                })
                .collect(),
            TimeScale::Month => self
                .daily_data
                .iter()
                .map(|d| SeriesPoint {
                    index: d.day,
                    event_count: d.event_count,
                    total_power: d.total_power,
                })
                .collect(),
            TimeScale::Year => self
                .monthly_data
                .iter()
                .map(|m| SeriesPoint {
                    index: m.month,
                    event_count: m.event_count,
                    total_power: m.total_power,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::Engine;
    use crate::sim::types::SimulationParameters;

    #[test]
    fn parses_known_names() {
        for name in TimeScale::NAMES {
            let scale: TimeScale = name.parse().expect("known scale should parse");
            assert_eq!(scale.to_string(), *name);
        }
        assert!("week".parse::<TimeScale>().is_err());
    }

    #[test]
    fn default_days_per_scale() {
        assert_eq!(TimeScale::Day.default_days(), 1);
        assert_eq!(TimeScale::Month.default_days(), 30);
        assert_eq!(TimeScale::Year.default_days(), 365);
        assert_eq!(TimeScale::default(), TimeScale::Year);
    }

    #[test]
    fn series_selects_matching_aggregate() {
        let params = SimulationParameters::new(3, 60.0, 11.0, 45);
        let result = Engine::seeded(&params, 1)
            .run()
            .expect("whole-day run should succeed");

        let day = result.series(TimeScale::Day);
        let month = result.series(TimeScale::Month);
        let year = result.series(TimeScale::Year);

        assert_eq!(day.len(), 45 * 24);
        assert_eq!(month.len(), 45);
        assert_eq!(year.len(), 2);
        assert_eq!(month[0].index, 1);
        assert_eq!(year[1].total_power, result.monthly_data[1].total_power);
    }
}
