use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::city::City;

/// Environment variable naming the directory holding the default city files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";
/// Environment variable naming a JSON city → file mapping.
pub const CITY_CONFIG_ENV: &str = "BIKESHARE_CITY_CONFIG";

/// Maps each city to the CSV file holding its trip log.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "Chicago": "data/chicago.csv",
///   "New York City": "data/new_york_city.csv"
/// }
/// ```
/// A city left out of the mapping has no data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitySources {
    entries: BTreeMap<City, PathBuf>,
}

impl CitySources {
    /// Every known city mapped to its default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let entries = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.default_file_name())))
            .collect();
        Self { entries }
    }

    /// Loads the mapping from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city config '{}'", path.display()))?;
        let sources: CitySources = serde_json::from_str(&content)
            .with_context(|| format!("invalid city config '{}'", path.display()))?;
        Ok(sources)
    }

    /// Uses `BIKESHARE_CITY_CONFIG` when set, otherwise the default file
    /// names under `BIKESHARE_DATA_DIR` (current directory if unset).
    pub fn from_env() -> Result<Self> {
        match std::env::var(CITY_CONFIG_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => {
                let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| ".".to_string());
                Ok(Self::in_dir(dir))
            }
        }
    }

    pub fn with_source(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(city, path.into());
        self
    }

    /// Returns the file configured for `city`, if any.
    pub fn path_for(&self, city: City) -> Option<&Path> {
        self.entries.get(&city).map(PathBuf::as_path)
    }

    /// Iterates over all `(city, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        self.entries.iter().map(|(c, p)| (*c, p.as_path()))
    }
}
