//! Month / weekday filtering over derived trips.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;

use crate::dataset::{Dataset, Month, Trip, parse_weekday, weekday_name};
use crate::error::AnalysisError;

/// Wildcard keyword accepted for either selector.
pub const ALL: &str = "All";

/// Either no restriction, or equality with one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(want) => value == Some(want),
        }
    }
}

pub type MonthSelector = Selector<Month>;
pub type DaySelector = Selector<Weekday>;

impl MonthSelector {
    pub fn parse(s: &str) -> Result<Self, AnalysisError> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }

    /// `All` followed by every month.
    pub fn choices() -> impl Iterator<Item = MonthSelector> {
        std::iter::once(Selector::All).chain(Month::ALL.into_iter().map(Selector::Only))
    }
}

impl DaySelector {
    pub fn parse(s: &str) -> Result<Self, AnalysisError> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Selector::All)
        } else {
            parse_weekday(s).map(Selector::Only)
        }
    }

    /// `All` followed by every weekday, Monday first.
    pub fn choices() -> impl Iterator<Item = DaySelector> {
        std::iter::once(Selector::All)
            .chain(crate::dataset::WEEKDAYS.into_iter().map(Selector::Only))
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(ALL),
            Selector::Only(m) => f.write_str(m.name()),
        }
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(ALL),
            Selector::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl Serialize for MonthSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for DaySelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn keep(trip: &Trip, month: MonthSelector, day: DaySelector) -> bool {
    month.matches(trip.derived.month.as_ref()) && day.matches(Some(&trip.derived.weekday))
}

/// Rows matching both selectors, in their original order.
///
/// Reads only derived fields. A row with an unmapped month never matches a
/// specific month.
pub fn filter(dataset: &Dataset, month: MonthSelector, day: DaySelector) -> Dataset {
    dataset.select(|t| keep(t, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{RawDataset, RawTrip, Schema};
    use crate::temporal::derive;
    use std::sync::Arc;

    fn dataset(starts: &[&str]) -> Dataset {
        let rows = starts
            .iter()
            .map(|s| RawTrip {
                start_time: s.to_string(),
                ..Default::default()
            })
            .collect();
        derive(RawDataset {
            schema: Schema::full(),
            rows,
            ..Default::default()
        })
        .0
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(MonthSelector::parse("All").unwrap(), Selector::All);
        assert_eq!(
            MonthSelector::parse("march").unwrap(),
            Selector::Only(Month::March)
        );
        assert!(MonthSelector::parse("July").is_err());
        assert_eq!(
            DaySelector::parse("Sunday").unwrap(),
            Selector::Only(Weekday::Sun)
        );
        assert!(matches!(
            DaySelector::parse("Someday"),
            Err(AnalysisError::UnknownDay(_))
        ));
    }

    #[test]
    fn test_choices_cover_all_selectors() {
        assert_eq!(MonthSelector::choices().count(), 7);
        assert_eq!(DaySelector::choices().count(), 8);
    }

    #[test]
    fn test_filter_by_month_and_day() {
        // 2017-01-02 Monday, 2017-01-03 Tuesday, 2017-02-06 Monday
        let ds = dataset(&[
            "2017-01-02 10:00:00",
            "2017-01-03 10:00:00",
            "2017-02-06 10:00:00",
        ]);

        let jan = filter(&ds, Selector::Only(Month::January), Selector::All);
        assert_eq!(jan.len(), 2);

        let mondays = filter(&ds, Selector::All, Selector::Only(Weekday::Mon));
        assert_eq!(mondays.len(), 2);

        let jan_mondays = filter(&ds, Selector::Only(Month::January), Selector::Only(Weekday::Mon));
        assert_eq!(jan_mondays.len(), 1);
        assert_eq!(jan_mondays.trips()[0].start_time, ds.trips()[0].start_time);
    }

    #[test]
    fn test_filter_shares_rows_with_source() {
        let ds = dataset(&["2017-01-02 10:00:00", "2017-03-06 10:00:00"]);

        let all = filter(&ds, Selector::All, Selector::All);
        let march = filter(&ds, Selector::Only(Month::March), Selector::All);

        assert!(Arc::ptr_eq(&all.trips()[0], &ds.trips()[0]));
        assert!(Arc::ptr_eq(&march.trips()[0], &ds.trips()[1]));
        // source, full selection and march selection
        assert_eq!(Arc::strong_count(&ds.trips()[1]), 3);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let ds = dataset(&["2017-01-02 10:00:00"]);
        let none = filter(&ds, Selector::Only(Month::June), Selector::All);
        assert!(none.is_empty());
        assert_eq!(none.schema(), ds.schema());
    }

    #[test]
    fn test_unmapped_month_excluded_only_when_restricted() {
        let ds = dataset(&["2017-08-01 10:00:00"]);
        assert_eq!(filter(&ds, Selector::All, Selector::All).len(), 1);
        assert!(filter(&ds, Selector::Only(Month::January), Selector::All).is_empty());
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(MonthSelector::All.to_string(), "All");
        assert_eq!(DaySelector::Only(Weekday::Wed).to_string(), "Wednesday");
    }
}
