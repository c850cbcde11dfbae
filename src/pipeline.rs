//! Request handling: validate, load, derive, filter, aggregate.

use serde::Serialize;
use tracing::info;

use crate::city::City;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{DaySelector, MonthSelector, filter};
use crate::loader::TripLoader;
use crate::preview::{PreviewRow, preview};
use crate::report::{RowCounts, TripReport};
use crate::stats::TripStats;
use crate::temporal::{DeriveReport, derive};

/// A validated analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub city: City,
    pub month: MonthSelector,
    pub day: DaySelector,
}

impl AnalysisRequest {
    /// Validates user input. Unknown city, month or day names are rejected
    /// here, before any data is loaded.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self> {
        Ok(AnalysisRequest {
            city: city.parse()?,
            month: MonthSelector::parse(month)?,
            day: DaySelector::parse(day)?,
        })
    }

    /// Every month × day combination for `city`, starting with All/All.
    pub fn sweep(city: City) -> Vec<AnalysisRequest> {
        MonthSelector::choices()
            .flat_map(|month| {
                DaySelector::choices().map(move |day| AnalysisRequest { city, month, day })
            })
            .collect()
    }
}

/// A city's trips with temporal fields derived, before filtering.
#[derive(Debug, Clone)]
pub struct DerivedCity {
    pub city: City,
    pub dataset: Dataset,
    pub derive_report: DeriveReport,
}

/// Loads and derives one city's trips.
pub fn load_city<L: TripLoader + ?Sized>(loader: &L, city: City) -> Result<DerivedCity> {
    let raw = loader.load(city)?;
    let (dataset, derive_report) = derive(raw);
    Ok(DerivedCity {
        city,
        dataset,
        derive_report,
    })
}

impl DerivedCity {
    /// Filters and aggregates for one month/day selection.
    #[tracing::instrument(skip_all, fields(city = %self.city, month = %month, day = %day))]
    pub fn analyze(&self, month: MonthSelector, day: DaySelector) -> TripReport {
        let selected = filter(&self.dataset, month, day);
        let rows = RowCounts::new(&self.derive_report, selected.len());
        info!(selected = rows.selected, "Running aggregators");

        TripReport::new(self.city, month, day, rows, TripStats::from_dataset(&selected))
    }

    /// First `rows` trips of the selection, for display.
    pub fn preview(&self, month: MonthSelector, day: DaySelector, rows: usize) -> Vec<PreviewRow> {
        preview(&filter(&self.dataset, month, day), rows)
    }
}

/// Runs one request end to end.
pub fn run_request<L: TripLoader + ?Sized>(
    loader: &L,
    request: AnalysisRequest,
) -> Result<TripReport> {
    let derived = load_city(loader, request.city)?;
    Ok(derived.analyze(request.month, request.day))
}
