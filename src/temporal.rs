//! Temporal feature derivation: month, weekday and hour bucket.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::dataset::{Dataset, DerivedFields, RawDataset, RawTrip, Trip};

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Row accounting for one derivation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveReport {
    pub rows_in: usize,
    /// Rows the parser already dropped before derivation.
    pub unreadable: usize,
    /// Rows dropped because their start timestamp did not parse.
    pub skipped_malformed: usize,
    /// Rows whose month falls outside January..June.
    pub unmapped_month: usize,
}

/// Parses a trip timestamp. `%.f` also matches timestamps with no fraction.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Truncates a float birth year such as `1992.0`. Values outside the `i32`
/// range are treated as missing.
fn whole_year(year: f64) -> Option<i32> {
    let year = year.trunc();
    (year.is_finite() && year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX))
        .then_some(year as i32)
}

fn derive_trip(raw: RawTrip) -> Option<Trip> {
    let start_time = parse_timestamp(&raw.start_time)?;

    Some(Trip {
        derived: DerivedFields::from_timestamp(&start_time),
        start_time,
        end_time: raw.end_time.as_deref().and_then(parse_timestamp),
        trip_duration: raw.trip_duration,
        start_station: raw.start_station,
        end_station: raw.end_station,
        user_type: raw.user_type,
        gender: raw.gender,
        birth_year: raw.birth_year.and_then(whole_year),
    })
}

/// Derives temporal fields for every row, dropping rows whose start
/// timestamp cannot be parsed.
#[tracing::instrument(skip(raw), fields(rows = raw.rows.len()))]
pub fn derive(raw: RawDataset) -> (Dataset, DeriveReport) {
    let mut report = DeriveReport {
        rows_in: raw.rows.len(),
        unreadable: raw.unreadable_rows,
        ..Default::default()
    };

    let mut trips = Vec::with_capacity(raw.rows.len());
    for row in raw.rows {
        match derive_trip(row) {
            Some(trip) => {
                if trip.derived.month.is_none() {
                    report.unmapped_month += 1;
                }
                trips.push(trip);
            }
            None => report.skipped_malformed += 1,
        }
    }

    if report.skipped_malformed > 0 {
        warn!(
            skipped = report.skipped_malformed,
            "Dropped rows with malformed start timestamps"
        );
    }
    if report.unmapped_month > 0 {
        debug!(
            unmapped = report.unmapped_month,
            "Rows with a start month outside January-June"
        );
    }

    (Dataset::new(raw.schema, trips), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Month, Schema};
    use chrono::Weekday;

    fn raw(start: &str) -> RawTrip {
        RawTrip {
            start_time: start.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01T09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 09:07:57.250").is_some());
        assert!(parse_timestamp("01/01/2017 09:07").is_none());
    }

    #[test]
    fn test_derive_skips_malformed_rows() {
        let ds = RawDataset {
            schema: Schema::full(),
            rows: vec![raw("2017-03-06 17:02:11"), raw("garbage"), raw("")],
            ..Default::default()
        };

        let (derived, report) = derive(ds);

        assert_eq!(derived.len(), 1);
        assert_eq!(report.rows_in, 3);
        assert_eq!(report.skipped_malformed, 2);

        let fields = derived.trips()[0].derived;
        assert_eq!(fields.month, Some(Month::March));
        assert_eq!(fields.weekday, Weekday::Mon);
        assert_eq!(fields.hour_bucket(), "17:00");
    }

    #[test]
    fn test_unmapped_month_is_kept_and_counted() {
        let ds = RawDataset {
            schema: Schema::full(),
            rows: vec![raw("2017-09-01 00:00:00")],
            ..Default::default()
        };

        let (derived, report) = derive(ds);

        assert_eq!(derived.len(), 1);
        assert_eq!(derived.trips()[0].derived.month, None);
        assert_eq!(derived.trips()[0].derived.hour_bucket(), "0:00");
        assert_eq!(report.unmapped_month, 1);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let rows = vec![raw("2017-05-14 23:59:59"), raw("2017-02-28 06:30:00")];
        let make = || RawDataset {
            schema: Schema::full(),
            rows: rows.clone(),
            ..Default::default()
        };

        let (first, _) = derive(make());
        let (second, _) = derive(make());

        assert_eq!(first.trips(), second.trips());
    }

    #[test]
    fn test_birth_year_float_text_truncates() {
        let mut row = raw("2017-01-01 00:00:00");
        row.birth_year = Some(1992.0);
        let trip = derive_trip(row).unwrap();
        assert_eq!(trip.birth_year, Some(1992));
    }

    #[test]
    fn test_non_finite_birth_year_is_missing() {
        for bad in [f64::NAN, f64::INFINITY, 1e12] {
            let mut row = raw("2017-01-01 00:00:00");
            row.birth_year = Some(bad);
            assert_eq!(derive_trip(row).unwrap().birth_year, None, "{bad}");
        }
    }
}
