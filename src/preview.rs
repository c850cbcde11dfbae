use chrono::NaiveDateTime;
use serde::Serialize;

use crate::dataset::{Dataset, Month, Trip};

/// A trip as shown in a data preview: source fields plus derived ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PreviewRow {
    #[serde(rename = "Start Time")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: Option<f64>,
    #[serde(rename = "Start Station")]
    pub start_station: Option<String>,
    #[serde(rename = "End Station")]
    pub end_station: Option<String>,
    #[serde(rename = "User Type")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<String>>,
    #[serde(rename = "Birth Year", skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<Option<i32>>,
    #[serde(rename = "month")]
    pub month: Option<Month>,
    #[serde(rename = "dow")]
    pub weekday: &'static str,
    #[serde(rename = "hour")]
    pub hour: String,
}

fn preview_row(trip: &Trip, has_gender: bool, has_birth_year: bool) -> PreviewRow {
    PreviewRow {
        start_time: trip.start_time,
        end_time: trip.end_time,
        trip_duration: trip.trip_duration,
        start_station: trip.start_station.clone(),
        end_station: trip.end_station.clone(),
        user_type: trip.user_type.clone(),
        gender: has_gender.then(|| trip.gender.clone()),
        birth_year: has_birth_year.then_some(trip.birth_year),
        month: trip.derived.month,
        weekday: trip.derived.weekday_name(),
        hour: trip.derived.hour_bucket(),
    }
}

/// The first `rows` trips of `dataset`, in order. Optional columns the city
/// does not track are left out of each row.
pub fn preview(dataset: &Dataset, rows: usize) -> Vec<PreviewRow> {
    let schema = dataset.schema();
    dataset
        .trips()
        .iter()
        .take(rows)
        .map(|t| preview_row(t, schema.has_gender, schema.has_birth_year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{RawDataset, RawTrip, Schema};
    use crate::temporal::derive;

    fn dataset(schema: Schema, n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| RawTrip {
                start_time: format!("2017-02-{:02} 13:00:00", i + 1),
                start_station: Some(format!("S{i}")),
                ..Default::default()
            })
            .collect();
        derive(RawDataset {
            schema,
            rows,
            ..Default::default()
        })
        .0
    }

    #[test]
    fn test_preview_takes_first_rows() {
        let rows = preview(&dataset(Schema::full(), 10), 5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].start_station.as_deref(), Some("S0"));
        assert_eq!(rows[4].start_station.as_deref(), Some("S4"));
        assert_eq!(rows[0].hour, "13:00");
        assert_eq!(rows[0].month, Some(Month::February));
    }

    #[test]
    fn test_preview_zero_rows() {
        assert!(preview(&dataset(Schema::full(), 3), 0).is_empty());
    }

    #[test]
    fn test_preview_more_than_available() {
        assert_eq!(preview(&dataset(Schema::full(), 2), 200).len(), 2);
    }

    #[test]
    fn test_preview_omits_untracked_columns() {
        let rows = preview(&dataset(Schema::default(), 1), 1);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert!(json.get("Gender").is_none());
        assert!(json.get("Birth Year").is_none());
        assert_eq!(json["dow"], "Wednesday");
    }
}
