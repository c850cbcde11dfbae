//! Rider demographics: user types, gender and birth year.
//!
//! Gender and birth year are only tracked by some cities. When the column is
//! absent every derived figure is a "not tracked" sentinel and no chart
//! series is produced; when it is present, missing per-row values are
//! skipped.

use serde::Serialize;

use crate::analyzers::frequency::{FrequencyTable, series};
use crate::analyzers::types::{RankedValue, Sentinel, Stat};
use crate::dataset::{Column, Dataset};

pub const SUBSCRIBER: &str = "Subscriber";
pub const CUSTOMER: &str = "Customer";
pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeCounts {
    pub subscriber: usize,
    pub customer: usize,
    /// Every user type seen, first-occurrence order.
    pub series: Vec<RankedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderCounts {
    pub male: Stat<usize>,
    pub female: Stat<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<RankedValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Stat<i32>,
    pub most_recent: Stat<i32>,
    pub most_common: Stat<i32>,
    /// Count per year, oldest first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<RankedValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub user_types: UserTypeCounts,
    pub gender: GenderCounts,
    pub birth_year: BirthYearStats,
}

pub fn user_type_counts(dataset: &Dataset) -> UserTypeCounts {
    let table =
        FrequencyTable::from_values(dataset.trips().iter().map(|t| t.user_type.as_deref()));

    UserTypeCounts {
        subscriber: table.get(&SUBSCRIBER),
        customer: table.get(&CUSTOMER),
        series: series(&table, |s| s.to_string()),
    }
}

pub fn gender_counts(dataset: &Dataset) -> GenderCounts {
    match dataset.genders() {
        Column::Absent => GenderCounts {
            male: Stat::Missing(Sentinel::GenderNotTracked),
            female: Stat::Missing(Sentinel::GenderNotTracked),
            series: None,
        },
        Column::Present(values) => {
            let table = FrequencyTable::from_values(values);
            GenderCounts {
                male: Stat::Value(table.get(&MALE)),
                female: Stat::Value(table.get(&FEMALE)),
                series: Some(series(&table, |s| s.to_string())),
            }
        }
    }
}

pub fn birth_year_stats(dataset: &Dataset) -> BirthYearStats {
    let values = match dataset.birth_years() {
        Column::Absent => {
            let not_tracked = Stat::Missing(Sentinel::BirthYearNotTracked);
            return BirthYearStats {
                earliest: not_tracked.clone(),
                most_recent: not_tracked.clone(),
                most_common: not_tracked,
                distribution: None,
            };
        }
        Column::Present(values) => values,
    };

    let table = FrequencyTable::from_values(values);

    let mut distribution: Vec<(i32, usize)> = table.iter().map(|(y, c)| (*y, c)).collect();
    distribution.sort_by_key(|(year, _)| *year);

    BirthYearStats {
        earliest: Stat::from_option(distribution.first().map(|(y, _)| *y), Sentinel::NoData),
        most_recent: Stat::from_option(distribution.last().map(|(y, _)| *y), Sentinel::NoData),
        most_common: Stat::from_option(table.mode().map(|(y, _)| *y), Sentinel::NoData),
        distribution: Some(
            distribution
                .into_iter()
                .map(|(year, count)| RankedValue::new(year.to_string(), count))
                .collect(),
        ),
    }
}

pub fn summarize_demographics(dataset: &Dataset) -> Demographics {
    Demographics {
        user_types: user_type_counts(dataset),
        gender: gender_counts(dataset),
        birth_year: birth_year_stats(dataset),
    }
}
