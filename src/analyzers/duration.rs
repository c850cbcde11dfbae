use serde::Serialize;

use crate::analyzers::types::{Sentinel, Stat};
use crate::dataset::Dataset;

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSummary {
    /// Number of trips with a recorded duration.
    pub trips: usize,
    pub total_seconds: f64,
    pub mean_seconds: Stat<f64>,
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sums and averages every present trip duration.
pub fn summarize_durations(dataset: &Dataset) -> DurationSummary {
    let durations: Vec<f64> = dataset
        .trips()
        .iter()
        .filter_map(|t| t.trip_duration)
        .collect();

    DurationSummary {
        trips: durations.len(),
        total_seconds: durations.iter().sum(),
        mean_seconds: Stat::from_option(mean(&durations), Sentinel::UndefinedMean),
    }
}
