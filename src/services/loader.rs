//! CSV dataset loading
//!
//! Both input tables are read once at startup and held read-only for the
//! rest of the session. Load-time failures (missing file, unparsable date,
//! broken count invariant) are fatal; nothing downstream recovers from them.

use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::types::{DailyRecord, DashboardError, DateRange, HourlyRecord, Result};

/// The two in-memory input tables for one session.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// Min/max date of the daily table, used for filter defaults and clamping.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.daily.iter().map(|r| r.date).min()?;
        let max = self.daily.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Full span of the daily table as a filter range.
    pub fn full_range(&self) -> Option<DateRange> {
        self.date_bounds()
            .map(|(start, end)| DateRange::new(start, end))
    }
}

/// Load both input tables. The daily table must contain at least one row;
/// there is no usable filter range without it.
pub fn load_dataset(day_path: &Path, hour_path: &Path) -> Result<Dataset> {
    let daily = load_daily(day_path)?;
    if daily.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }
    let hourly = load_hourly(hour_path)?;
    Ok(Dataset { daily, hourly })
}

/// Read the daily table, validating the count invariant per row.
pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (i, row) in reader.deserialize().enumerate() {
        let record: DailyRecord = row?;
        check_count_sum(
            path,
            i,
            record.casual_count,
            record.registered_count,
            record.total_count,
        )?;
        if record.day_of_week != record.date.weekday() {
            // Trust the column, but flag the disagreement.
            eprintln!(
                "[bikedash] Warning: {}: row {}: day_of_week {:?} does not match date {}",
                path.display(),
                i + 2,
                record.day_of_week,
                record.date
            );
        }
        records.push(record);
    }

    Ok(records)
}

/// Read the hourly table, validating hour range and the count invariant.
pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (i, row) in reader.deserialize().enumerate() {
        let record: HourlyRecord = row?;
        if record.hour > 23 {
            return Err(DashboardError::Malformed(format!(
                "{}: row {}: hour {} out of range 0-23",
                path.display(),
                i + 2,
                record.hour
            )));
        }
        check_count_sum(
            path,
            i,
            record.casual_count,
            record.registered_count,
            record.total_count,
        )?;
        records.push(record);
    }

    Ok(records)
}

fn check_count_sum(path: &Path, row_index: usize, casual: u64, registered: u64, total: u64) -> Result<()> {
    if casual.saturating_add(registered) != total {
        // row_index is 0-based over data rows; +2 accounts for the header line
        return Err(DashboardError::Malformed(format!(
            "{}: row {}: total {} != casual {} + registered {}",
            path.display(),
            row_index + 2,
            total,
            casual,
            registered
        )));
    }
    Ok(())
}
