use serde::Serialize;

use crate::analyzers::demographics::{Demographics, summarize_demographics};
use crate::analyzers::duration::{DurationSummary, summarize_durations};
use crate::analyzers::travel::{StationStats, TravelTimes, station_stats, travel_times};
use crate::dataset::Dataset;

/// Every aggregate computed over one filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripStats {
    pub trips: usize,
    pub travel_times: TravelTimes,
    pub stations: StationStats,
    pub duration: DurationSummary,
    pub users: Demographics,
}

impl TripStats {
    /// Runs every aggregator over `dataset`. The aggregators are independent
    /// and only read the dataset.
    #[tracing::instrument(skip(dataset), fields(trips = dataset.len()))]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        TripStats {
            trips: dataset.len(),
            travel_times: travel_times(dataset),
            stations: station_stats(dataset),
            duration: summarize_durations(dataset),
            users: summarize_demographics(dataset),
        }
    }
}
