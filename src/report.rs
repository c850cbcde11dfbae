//! Assembles aggregator results into the shapes consumers read: a full
//! report with chart series, and a flat summary row for CSV.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::{RankedValue, Stat};
use crate::city::City;
use crate::filter::{DaySelector, MonthSelector};
use crate::stats::TripStats;
use crate::temporal::DeriveReport;

/// Row accounting from load to selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub loaded: usize,
    pub skipped_unreadable: usize,
    pub skipped_malformed: usize,
    pub selected: usize,
}

impl RowCounts {
    pub fn new(derive: &DeriveReport, selected: usize) -> Self {
        RowCounts {
            loaded: derive.rows_in,
            skipped_unreadable: derive.unreadable,
            skipped_malformed: derive.skipped_malformed,
            selected,
        }
    }
}

/// Numeric series for one bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<RankedValue>,
}

impl ChartSeries {
    fn counts(title: &'static str, x_label: &'static str, points: Vec<RankedValue>) -> Self {
        ChartSeries {
            title,
            x_label,
            y_label: "Count",
            points,
        }
    }
}

/// Full result of one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub month: MonthSelector,
    pub day: DaySelector,
    pub rows: RowCounts,
    pub stats: TripStats,
    pub charts: Vec<ChartSeries>,
}

impl TripReport {
    pub fn new(
        city: City,
        month: MonthSelector,
        day: DaySelector,
        rows: RowCounts,
        stats: TripStats,
    ) -> Self {
        let charts = charts(&stats);
        TripReport {
            generated_at: Utc::now(),
            city,
            month,
            day,
            rows,
            stats,
            charts,
        }
    }

    pub fn chart(&self, title: &str) -> Option<&ChartSeries> {
        self.charts.iter().find(|c| c.title == title)
    }

    pub fn summary(&self) -> SummaryRecord {
        SummaryRecord::from_report(self)
    }
}

pub const BIRTH_YEAR_CHART: &str = "Distribution of Birth Year";
pub const GENDER_CHART: &str = "Gender Count Plot";
pub const USER_TYPE_CHART: &str = "User Type Count Plot";
pub const START_STATION_CHART: &str = "Top 10 Most Used Start Stations";
pub const END_STATION_CHART: &str = "Top 10 Most Used End Stations";
pub const ROUTE_CHART: &str = "Top 10 Most Plied Routes";

/// Chart series for `stats`. Gender and birth-year charts are left out when
/// the city does not track those columns.
fn charts(stats: &TripStats) -> Vec<ChartSeries> {
    let mut out = Vec::with_capacity(6);

    if let Some(points) = &stats.users.birth_year.distribution {
        out.push(ChartSeries::counts(BIRTH_YEAR_CHART, "Year", points.clone()));
    }
    if let Some(points) = &stats.users.gender.series {
        out.push(ChartSeries::counts(GENDER_CHART, "Gender", points.clone()));
    }
    out.push(ChartSeries::counts(
        USER_TYPE_CHART,
        "User Type",
        stats.users.user_types.series.clone(),
    ));
    out.push(ChartSeries::counts(
        START_STATION_CHART,
        "Stations",
        stats.stations.start.top.clone(),
    ));
    out.push(ChartSeries::counts(
        END_STATION_CHART,
        "Stations",
        stats.stations.end.top.clone(),
    ));
    out.push(ChartSeries::counts(
        ROUTE_CHART,
        "Routes",
        stats.stations.route.top.clone(),
    ));

    out
}

/// One flat CSV row per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub month: MonthSelector,
    pub day: DaySelector,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub trips: usize,

    // travel times
    pub most_common_month: Stat<String>,
    pub most_common_day: Stat<String>,
    pub most_common_hour: Stat<String>,

    // stations
    pub most_used_start_station: Stat<String>,
    pub most_used_end_station: Stat<String>,
    pub most_frequent_route: Stat<String>,

    // duration
    pub total_travel_seconds: f64,
    pub mean_travel_seconds: Stat<f64>,

    // users
    pub subscribers: usize,
    pub customers: usize,
    pub male: Stat<usize>,
    pub female: Stat<usize>,
    pub earliest_birth_year: Stat<i32>,
    pub most_recent_birth_year: Stat<i32>,
    pub most_common_birth_year: Stat<i32>,
}

impl SummaryRecord {
    pub fn from_report(report: &TripReport) -> Self {
        let s = &report.stats;
        SummaryRecord {
            generated_at: report.generated_at,
            city: report.city,
            month: report.month,
            day: report.day,
            loaded_rows: report.rows.loaded,
            skipped_rows: report.rows.skipped_unreadable + report.rows.skipped_malformed,
            trips: report.rows.selected,
            most_common_month: s.travel_times.most_common_month.clone(),
            most_common_day: s.travel_times.most_common_day.clone(),
            most_common_hour: s.travel_times.most_common_hour.clone(),
            most_used_start_station: s.stations.start.most_used.clone(),
            most_used_end_station: s.stations.end.most_used.clone(),
            most_frequent_route: s.stations.route.most_used.clone(),
            total_travel_seconds: s.duration.total_seconds,
            mean_travel_seconds: s.duration.mean_seconds.clone(),
            subscribers: s.users.user_types.subscriber,
            customers: s.users.user_types.customer,
            male: s.users.gender.male.clone(),
            female: s.users.gender.female.clone(),
            earliest_birth_year: s.users.birth_year.earliest.clone(),
            most_recent_birth_year: s.users.birth_year.most_recent.clone(),
            most_common_birth_year: s.users.birth_year.most_common.clone(),
        }
    }
}
