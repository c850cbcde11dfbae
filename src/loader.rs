//! Dataset loading behind a trait, so the engine never touches paths.

use std::fs::File;
use std::io::BufReader;
use tracing::info;

use crate::city::City;
use crate::config::CitySources;
use crate::dataset::RawDataset;
use crate::error::{AnalysisError, LoadError};
use crate::parser::parse_trips;

/// Supplies raw trip rows for a city.
pub trait TripLoader: Send + Sync {
    fn load(&self, city: City) -> Result<RawDataset, AnalysisError>;
}

/// Reads each city's trip log from the CSV file named in [`CitySources`].
pub struct CsvTripLoader {
    sources: CitySources,
}

impl CsvTripLoader {
    pub fn new(sources: CitySources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &CitySources {
        &self.sources
    }
}

impl TripLoader for CsvTripLoader {
    #[tracing::instrument(skip(self), fields(city = %city))]
    fn load(&self, city: City) -> Result<RawDataset, AnalysisError> {
        let path = self
            .sources
            .path_for(city)
            .ok_or(AnalysisError::MissingSource { city })?;

        let file = File::open(path)
            .map_err(LoadError::from)
            .map_err(|source| AnalysisError::Load { city, source })?;
        let raw = parse_trips(BufReader::new(file))
            .map_err(|source| AnalysisError::Load { city, source })?;

        info!(
            path = %path.display(),
            rows = raw.rows.len(),
            has_gender = raw.schema.has_gender,
            has_birth_year = raw.schema.has_birth_year,
            "Loaded trip file"
        );
        Ok(raw)
    }
}
