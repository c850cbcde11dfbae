//! Most frequent travel times, stations and routes.

use serde::Serialize;

use crate::analyzers::frequency::{FrequencyTable, TOP_N, mode_of, ranking};
use crate::analyzers::types::{RankedValue, Sentinel, Stat};
use crate::dataset::{Dataset, hour_bucket, weekday_name};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelTimes {
    pub most_common_month: Stat<String>,
    pub most_common_day: Stat<String>,
    pub most_common_hour: Stat<String>,
}

/// Mode and top-N ranking of one station-like field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRanking {
    pub most_used: Stat<String>,
    pub top: Vec<RankedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start: StationRanking,
    pub end: StationRanking,
    pub route: StationRanking,
}

pub fn travel_times(dataset: &Dataset) -> TravelTimes {
    let trips = dataset.trips();

    TravelTimes {
        most_common_month: mode_of(trips.iter().map(|t| t.derived.month), |m| {
            m.name().to_string()
        }),
        most_common_day: mode_of(trips.iter().map(|t| Some(t.derived.weekday)), |d| {
            weekday_name(*d).to_string()
        }),
        most_common_hour: mode_of(trips.iter().map(|t| Some(t.derived.hour)), |h| {
            hour_bucket(*h)
        }),
    }
}

fn rank<K, F>(table: FrequencyTable<K>, label: F) -> StationRanking
where
    K: std::hash::Hash + Eq,
    F: Fn(&K) -> String,
{
    StationRanking {
        most_used: Stat::from_option(table.mode().map(|(k, _)| label(k)), Sentinel::NoData),
        top: ranking(&table, TOP_N, label),
    }
}

pub fn station_stats(dataset: &Dataset) -> StationStats {
    let trips = dataset.trips();

    let starts = FrequencyTable::from_values(trips.iter().map(|t| t.start_station.as_deref()));
    let ends = FrequencyTable::from_values(trips.iter().map(|t| t.end_station.as_deref()));
    // every trip has a route key, see `Trip::route`
    let routes = FrequencyTable::from_values(trips.iter().map(|t| Some(t.route())));

    StationStats {
        start: rank(starts, |s| s.to_string()),
        end: rank(ends, |s| s.to_string()),
        route: rank(routes, String::clone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DerivedFields, Schema, Trip};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn trip(start: NaiveDateTime, from: Option<&str>, to: Option<&str>) -> Trip {
        Trip {
            start_time: start,
            end_time: None,
            trip_duration: Some(10.0),
            start_station: from.map(String::from),
            end_station: to.map(String::from),
            user_type: None,
            gender: None,
            birth_year: None,
            derived: DerivedFields::from_timestamp(&start),
        }
    }

    #[test]
    fn test_station_and_route_scenario() {
        let t = at(1, 2, 9);
        let ds = Dataset::new(
            Schema::full(),
            vec![
                trip(t, Some("A"), Some("B")),
                trip(t, Some("A"), Some("C")),
                trip(t, Some("A"), Some("B")),
            ],
        );

        let stats = station_stats(&ds);
        assert_eq!(stats.start.most_used, Stat::Value("A".to_string()));
        assert_eq!(stats.route.most_used, Stat::Value("A - B".to_string()));
        assert_eq!(
            stats.route.top[..2],
            [RankedValue::new("A - B", 2), RankedValue::new("A - C", 1)]
        );
    }

    #[test]
    fn test_missing_station_excluded_but_route_rendered() {
        let t = at(1, 2, 9);
        let ds = Dataset::new(
            Schema::full(),
            vec![trip(t, None, Some("B")), trip(t, None, Some("B"))],
        );

        let stats = station_stats(&ds);
        assert_eq!(stats.start.most_used, Stat::Missing(Sentinel::NoData));
        assert!(stats.start.top.is_empty());
        assert_eq!(stats.route.top, vec![RankedValue::new("None - B", 2)]);
    }

    #[test]
    fn test_travel_time_modes() {
        // Jan 2 and Jan 9 2017 are Mondays
        let ds = Dataset::new(
            Schema::full(),
            vec![
                trip(at(1, 2, 8), None, None),
                trip(at(1, 9, 8), None, None),
                trip(at(2, 1, 17), None, None),
            ],
        );

        let times = travel_times(&ds);
        assert_eq!(times.most_common_month, Stat::Value("January".to_string()));
        assert_eq!(times.most_common_day, Stat::Value("Monday".to_string()));
        assert_eq!(times.most_common_hour, Stat::Value("8:00".to_string()));
    }

    #[test]
    fn test_empty_dataset_yields_sentinels() {
        let ds = Dataset::new(Schema::full(), vec![]);

        let times = travel_times(&ds);
        assert_eq!(times.most_common_month, Stat::Missing(Sentinel::NoData));
        assert_eq!(times.most_common_hour, Stat::Missing(Sentinel::NoData));

        let stations = station_stats(&ds);
        assert_eq!(stations.route.most_used, Stat::Missing(Sentinel::NoData));
        assert!(stations.end.top.is_empty());
    }
}
