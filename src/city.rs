//! The fixed set of cities with published trip logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum City {
    Chicago,
    #[serde(rename = "New York City")]
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Display name, as used in requests and reports.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's trip log inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = AnalysisError;

    /// Accepts display names ("New York City") and file-style keys
    /// ("new_york_city"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" | "nyc" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(AnalysisError::UnknownCity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names() {
        for city in City::ALL {
            assert_eq!(city.name().parse::<City>().unwrap(), city);
        }
    }

    #[test]
    fn test_parse_file_style_keys() {
        assert_eq!("new_york_city".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("CHICAGO".parse::<City>().unwrap(), City::Chicago);
    }

    #[test]
    fn test_unknown_city_rejected() {
        let err = "Boston".parse::<City>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownCity(ref s) if s == "Boston"));
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&City::NewYorkCity).unwrap();
        assert_eq!(json, "\"New York City\"");
    }
}
