//! CSV parser for bikeshare trip logs.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use tracing::{debug, warn};

use crate::dataset::{RawDataset, RawTrip, Schema};
use crate::error::LoadError;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

fn has_column(headers: &StringRecord, name: &str) -> bool {
    headers.iter().any(|h| h == name)
}

/// Detects which optional columns a header row carries, failing if a
/// required column is missing.
pub fn detect_schema(headers: &StringRecord) -> Result<Schema, LoadError> {
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has_column(headers, c)) {
        return Err(LoadError::MissingColumn(*missing));
    }

    Ok(Schema {
        has_gender: has_column(headers, GENDER_COLUMN),
        has_birth_year: has_column(headers, BIRTH_YEAR_COLUMN),
    })
}

/// Reads trip rows from CSV. Columns are matched by header name; any other
/// column, including the unnamed leading index, is ignored. Empty cells and
/// the tokens in [`NA_TOKENS`](crate::dataset::NA_TOKENS) read as missing.
///
/// # Errors
///
/// Returns an error if the header row cannot be read or lacks a required
/// column. Individual rows that fail to deserialize are skipped and counted.
pub fn parse_trips<R: Read>(reader: R) -> Result<RawDataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let schema = detect_schema(rdr.headers()?)?;
    debug!(?schema, "Detected trip file schema");

    let mut rows = Vec::new();
    let mut unreadable_rows = 0;

    for result in rdr.deserialize::<RawTrip>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                unreadable_rows += 1;
                debug!(error = %e, "Skipping unreadable row");
            }
        }
    }

    if unreadable_rows > 0 {
        warn!(unreadable_rows, "Skipped rows that could not be read");
    }

    Ok(RawDataset {
        schema,
        rows,
        unreadable_rows,
    })
}
