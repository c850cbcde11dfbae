//! Output formatting and persistence for trip reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::report::{SummaryRecord, TripReport};
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format, at `info` so it
/// shows with the default filter.
pub fn print_pretty(report: &TripReport) {
    info!("{:#?}", report);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs the headline figures of a report, one field per event.
pub fn print_summary(report: &TripReport) {
    let s = report.summary();
    info!(
        city = %s.city,
        month = %s.month,
        day = %s.day,
        trips = s.trips,
        skipped = s.skipped_rows,
        "Selection"
    );
    info!(
        month = %s.most_common_month,
        day = %s.most_common_day,
        hour = %s.most_common_hour,
        "Most frequent times of travel"
    );
    info!(
        start = %s.most_used_start_station,
        end = %s.most_used_end_station,
        route = %s.most_frequent_route,
        "Most popular stations and trip"
    );
    info!(
        total_seconds = s.total_travel_seconds,
        mean_seconds = %s.mean_travel_seconds,
        "Trip duration"
    );
    info!(
        subscribers = s.subscribers,
        customers = s.customers,
        male = %s.male,
        female = %s.female,
        earliest_birth_year = %s.earliest_birth_year,
        most_recent_birth_year = %s.most_recent_birth_year,
        most_common_birth_year = %s.most_common_birth_year,
        "User statistics"
    );
}

/// Writes a report to `path` as pretty JSON, replacing any existing file.
pub fn write_json(path: &str, report: &TripReport) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    fs::write(path, body).with_context(|| format!("failed to write report to '{path}'"))?;
    debug!(path, "Wrote JSON report");
    Ok(())
}

/// Appends a [`SummaryRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &SummaryRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
