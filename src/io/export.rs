//! CSV export for simulation series.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::{DailyRecord, HeatmapEntry, HourlyRecord, MonthlyRecord, SimulationResult};

const DAILY_HEADER: [&str; 3] = ["day", "total_power_kw", "event_count"];
const MONTHLY_HEADER: [&str; 4] = ["month", "days", "total_power_kw", "event_count"];
const HEATMAP_HEADER: [&str; 3] = ["date", "event_count", "total_power_kw"];

/// Writes every series of a run into `dir` as separate CSV files.
///
/// Creates `dir` if needed and writes `hourly.csv`, `daily.csv`,
/// `monthly.csv` and `heatmap.csv`. Produces deterministic output for
/// identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if the directory or any file cannot be written.
pub fn export_dir(result: &SimulationResult, dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    write_hourly_csv(&result.hourly_data, buffered(&dir.join("hourly.csv"))?)?;
    write_daily_csv(&result.daily_data, buffered(&dir.join("daily.csv"))?)?;
    write_monthly_csv(&result.monthly_data, buffered(&dir.join("monthly.csv"))?)?;
    write_heatmap_csv(&result.heatmap_data, buffered(&dir.join("heatmap.csv"))?)
}

fn buffered(path: &Path) -> io::Result<io::BufWriter<File>> {
    Ok(io::BufWriter::new(File::create(path)?))
}

/// Writes hourly records with one `point_<i>_kw` column per charge point.
///
/// The point count is taken from the first record; an empty series
/// produces a header without point columns.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(records: &[HourlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let points = records.first().map_or(0, |r| r.power_by_point.len());
    let mut header = vec![
        "hour".to_string(),
        "total_power_kw".to_string(),
        "event_count".to_string(),
    ];
    header.extend((0..points).map(|i| format!("point_{i}_kw")));
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![
            r.hour.to_string(),
            r.total_power.to_string(),
            r.event_count.to_string(),
        ];
        row.extend(r.power_by_point.iter().map(u64::to_string));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes daily records.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_daily_csv(records: &[DailyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DAILY_HEADER)?;
    for r in records {
        wtr.write_record(&[
            r.day.to_string(),
            r.total_power.to_string(),
            r.event_count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes monthly records.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(records: &[MonthlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(MONTHLY_HEADER)?;
    for r in records {
        wtr.write_record(&[
            r.month.to_string(),
            r.days.to_string(),
            r.total_power.to_string(),
            r.event_count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes heatmap entries with ISO dates.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_heatmap_csv(entries: &[HeatmapEntry], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEATMAP_HEADER)?;
    for e in entries {
        wtr.write_record(&[
            e.date.format("%Y-%m-%d").to_string(),
            e.event_count.to_string(),
            e.total_power.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::Engine;
    use crate::sim::types::SimulationParameters;

    fn sample_result(days: usize) -> SimulationResult {
        Engine::seeded(&SimulationParameters::new(3, 80.0, 11.0, days), 42)
            .run()
            .expect("run should succeed")
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn hourly_header_has_point_columns() {
        let result = sample_result(1);
        let mut buf = Vec::new();
        write_hourly_csv(&result.hourly_data, &mut buf).expect("export should succeed");
        let csv = to_string(buf);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("hour,total_power_kw,event_count,point_0_kw,point_1_kw,point_2_kw")
        );
        // 24 data rows follow the header.
        assert_eq!(lines.count(), 24);
    }

    #[test]
    fn empty_hourly_series_writes_bare_header() {
        let mut buf = Vec::new();
        write_hourly_csv(&[], &mut buf).expect("export should succeed");
        assert_eq!(to_string(buf).trim_end(), "hour,total_power_kw,event_count");
    }

    #[test]
    fn row_counts_match_series() {
        let result = sample_result(45);

        let mut daily = Vec::new();
        write_daily_csv(&result.daily_data, &mut daily).expect("export should succeed");
        assert_eq!(to_string(daily).lines().count(), 46);

        let mut monthly = Vec::new();
        write_monthly_csv(&result.monthly_data, &mut monthly).expect("export should succeed");
        let monthly = to_string(monthly);
        assert_eq!(monthly.lines().count(), 3);
        assert!(monthly.lines().nth(2).is_some_and(|l| l.starts_with("2,15,")));
    }

    #[test]
    fn heatmap_rows_use_iso_dates() {
        let result = sample_result(2);
        let mut buf = Vec::new();
        write_heatmap_csv(&result.heatmap_data, &mut buf).expect("export should succeed");
        let csv = to_string(buf);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 366);
        assert!(lines[1].starts_with("2024-01-01,"));
        assert_eq!(lines[3], "2024-01-03,0,0");
    }

    #[test]
    fn deterministic_output() {
        let result = sample_result(3);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_daily_csv(&result.daily_data, &mut buf1).expect("export should succeed");
        write_daily_csv(&result.daily_data, &mut buf2).expect("export should succeed");
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let result = sample_result(2);
        let mut buf = Vec::new();
        write_daily_csv(&result.daily_data, &mut buf).expect("export should succeed");

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let mut total = 0_u64;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            total += rec[1].parse::<u64>().expect("power should be an integer");
        }
        assert_eq!(total, result.summary.total_energy_charged);
    }

    #[test]
    fn export_dir_writes_all_files() {
        let dir = std::env::temp_dir().join(format!("ev-demand-sim-export-{}", std::process::id()));
        export_dir(&sample_result(1), &dir).expect("export should succeed");
        for name in ["hourly.csv", "daily.csv", "monthly.csv", "heatmap.csv"] {
            assert!(dir.join(name).is_file(), "{name} should exist");
        }
        let _ = fs::remove_dir_all(&dir);
    }
}
