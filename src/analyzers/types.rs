//! Result types shared by the aggregators.

use serde::{Serialize, Serializer};
use std::fmt;

/// Out-of-band reason a statistic has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Nothing to aggregate in the current selection.
    NoData,
    /// Mean over zero durations.
    UndefinedMean,
    /// The city's trip log has no gender column.
    GenderNotTracked,
    /// The city's trip log has no birth-year column.
    BirthYearNotTracked,
}

impl Sentinel {
    pub fn message(self) -> &'static str {
        match self {
            Sentinel::NoData => "No data for the selected filters",
            Sentinel::UndefinedMean => "Mean is undefined for an empty selection",
            Sentinel::GenderNotTracked => "This city has no data for genders",
            Sentinel::BirthYearNotTracked => "This city has no data for year",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A reported statistic: a real value or the sentinel explaining its absence.
///
/// Serializes as the bare value, or as the sentinel's message.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat<T> {
    Value(T),
    Missing(Sentinel),
}

impl<T> Stat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Stat::Value(v) => Some(v),
            Stat::Missing(_) => None,
        }
    }

    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            Stat::Value(_) => None,
            Stat::Missing(s) => Some(*s),
        }
    }

    /// `Value` for `Some`, the given sentinel for `None`.
    pub fn from_option(value: Option<T>, otherwise: Sentinel) -> Self {
        value.map_or(Stat::Missing(otherwise), Stat::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Stat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Value(v) => v.fmt(f),
            Stat::Missing(s) => s.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Stat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stat::Value(v) => v.serialize(serializer),
            Stat::Missing(s) => serializer.serialize_str(s.message()),
        }
    }
}

/// One entry of a ranking or chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    pub label: String,
    pub count: usize,
}

impl RankedValue {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        RankedValue {
            label: label.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_serializes_value_or_message() {
        let v: Stat<usize> = Stat::Value(3);
        let m: Stat<usize> = Stat::Missing(Sentinel::GenderNotTracked);

        assert_eq!(serde_json::to_string(&v).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            "\"This city has no data for genders\""
        );
    }

    #[test]
    fn test_zero_mean_is_not_undefined() {
        let zero: Stat<f64> = Stat::Value(0.0);
        assert_ne!(zero, Stat::Missing(Sentinel::UndefinedMean));
        assert_eq!(zero.value(), Some(&0.0));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Stat::from_option(Some(1), Sentinel::NoData), Stat::Value(1));
        assert_eq!(
            Stat::<i32>::from_option(None, Sentinel::NoData).sentinel(),
            Some(Sentinel::NoData)
        );
    }
}
