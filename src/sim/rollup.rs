//! Daily and monthly rollups of hourly records.

use std::error::Error;
use std::fmt;

use super::types::{DAYS_PER_MONTH, DailyRecord, HOURS_PER_DAY, HourlyRecord, MonthlyRecord};

/// Failure to partition hourly records into whole days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupError {
    /// The hour count is not a multiple of 24.
    PartialDay {
        /// Number of hourly records received.
        hours: usize,
    },
}

impl fmt::Display for RollupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialDay { hours } => write!(
                f,
                "rollup error: {hours} hourly records do not form whole days \
                 ({} trailing hours)",
                hours % HOURS_PER_DAY
            ),
        }
    }
}

impl Error for RollupError {}

/// Partitions hourly records into contiguous 24-hour days.
///
/// # Errors
///
/// Returns [`RollupError::PartialDay`] if `hourly.len()` is not a multiple
/// of 24; no partial day is ever emitted or dropped silently.
pub fn daily(hourly: &[HourlyRecord]) -> Result<Vec<DailyRecord>, RollupError> {
    let chunks = hourly.chunks_exact(HOURS_PER_DAY);
    if !chunks.remainder().is_empty() {
        return Err(RollupError::PartialDay {
            hours: hourly.len(),
        });
    }

    Ok(chunks
        .enumerate()
        .map(|(i, hours)| DailyRecord {
            day: i + 1,
            total_power: hours.iter().map(|h| h.total_power).sum(),
            event_count: hours.iter().map(|h| h.event_count).sum(),
        })
        .collect())
}

/// Partitions daily records into nominal 30-day months.
///
/// Produces `ceil(days / 30)` buckets. A trailing partial month is kept as
/// a short final bucket rather than dropped, so monthly totals always match
/// the daily totals.
pub fn monthly(daily: &[DailyRecord]) -> Vec<MonthlyRecord> {
    daily
        .chunks(DAYS_PER_MONTH)
        .enumerate()
        .map(|(i, days)| MonthlyRecord {
            month: i + 1,
            days: days.len(),
            total_power: days.iter().map(|d| d.total_power).sum(),
            event_count: days.iter().map(|d| d.event_count).sum(),
        })
        .collect()
}
