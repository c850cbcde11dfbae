//! Error types surfaced at the request boundary.
//!
//! Per-row problems (missing values, malformed timestamps, absent optional
//! columns) never show up here; they are handled where they occur and turned
//! into counts or sentinels.

use thiserror::Error;

use crate::city::City;

/// Failure to read a city's trip file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
}

/// Request-level failures: bad input or no usable data source.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("unknown city '{0}' (expected one of: Chicago, New York City, Washington)")]
    UnknownCity(String),

    #[error("unknown month '{0}' (expected All or January through June)")]
    UnknownMonth(String),

    #[error("unknown day '{0}' (expected All or Monday through Sunday)")]
    UnknownDay(String),

    #[error("no trip data source configured for {city}")]
    MissingSource { city: City },

    #[error("failed to load trips for {city}: {source}")]
    Load {
        city: City,
        #[source]
        source: LoadError,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
