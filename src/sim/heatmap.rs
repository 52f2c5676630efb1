//! Projection of simulated days onto a fixed 365-day calendar.
//!
//! Simulated day `n` (1-based) lands on the `n`-th day counted from the
//! reference start date. This is plain date arithmetic, not a calendar
//! simulation: weekdays and seasons play no role.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::types::{DailyRecord, HEATMAP_DAYS, HEATMAP_START, HeatmapEntry};

/// Projects daily records onto the reference calendar starting at [`HEATMAP_START`].
pub fn project(daily: &[DailyRecord]) -> Vec<HeatmapEntry> {
    project_from(daily, HEATMAP_START)
}

/// Projects daily records onto 365 consecutive dates starting at `start`.
///
/// Always yields exactly [`HEATMAP_DAYS`] entries for any realistic start
/// date. Records are matched by their `day` number, not their position, so
/// gaps and unordered input are fine; the first record wins for a repeated
/// day. Dates without a simulated day read as zero; simulated days past
/// the 365th are not shown.
pub fn project_from(daily: &[DailyRecord], start: NaiveDate) -> Vec<HeatmapEntry> {
    let mut by_day: HashMap<usize, &DailyRecord> = HashMap::with_capacity(daily.len());
    for d in daily {
        by_day.entry(d.day).or_insert(d);
    }

    start
        .iter_days()
        .take(HEATMAP_DAYS)
        .enumerate()
        .map(|(i, date)| {
            let simulated = by_day.get(&(i + 1));
            HeatmapEntry {
                date,
                event_count: simulated.map_or(0, |d| d.event_count),
                total_power: simulated.map_or(0, |d| d.total_power),
            }
        })
        .collect()
}
