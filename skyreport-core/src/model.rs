use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};
use thiserror::Error;

/// Where to fetch a forecast for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Free-form city query, e.g. "Chamonix,FR".
    City(String),
    Coord { lat: f64, lon: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationParseError {
    #[error("location must not be empty")]
    Empty,

    #[error("latitude {0} is out of range -90..=90")]
    Latitude(f64),

    #[error("longitude {0} is out of range -180..=180")]
    Longitude(f64),
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LocationParseError::Empty);
        }

        // "lat,lon" with both halves numeric is a coordinate; anything else
        // (including "Paris,FR") goes to the API as a city query.
        let coord = s.split_once(',').and_then(|(lat, lon)| {
            Some((lat.trim().parse::<f64>().ok()?, lon.trim().parse::<f64>().ok()?))
        });

        if let Some((lat, lon)) = coord {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(LocationParseError::Latitude(lat));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(LocationParseError::Longitude(lon));
            }
            return Ok(Location::Coord { lat, lon });
        }

        Ok(Location::City(s.to_string()))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coord { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub location: Location,
    /// Number of three-hour slots to ask for (API `cnt`, 1..=40). `None` means all.
    pub count: Option<u8>,
}

impl ForecastRequest {
    pub const MAX_COUNT: u8 = 40;

    pub fn new(location: Location) -> Self {
        Self { location, count: None }
    }

    pub fn with_count(mut self, count: u8) -> Self {
        self.count = Some(count.clamp(1, Self::MAX_COUNT));
        self
    }
}

/// Ski conditions for one forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowReport {
    pub is_raining: bool,
    pub is_snowing: bool,
    pub date: DateTime<FixedOffset>,
    pub temperature_celsius: i32,
    pub weather_title: String,
    pub weather_description: String,
}

/// Stargazing conditions for one forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StargazingReport {
    pub is_good_for_stargazing: bool,
    pub date: DateTime<FixedOffset>,
    pub temperature_celsius: i32,
    pub weather_title: String,
    pub weather_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Snow,
    Stargazing,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Snow => "snow",
            ReportKind::Stargazing => "stargazing",
        }
    }

    pub const fn all() -> &'static [ReportKind] {
        &[ReportKind::Snow, ReportKind::Stargazing]
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReportKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "snow" | "ski" => Ok(ReportKind::Snow),
            "stargazing" | "stars" => Ok(ReportKind::Stargazing),
            _ => Err(anyhow::anyhow!(
                "Unknown report '{value}'. Supported reports: snow, stargazing."
            )),
        }
    }
}

/// Mapped forecast, one report per forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reports {
    Snow(Vec<SnowReport>),
    Stargazing(Vec<StargazingReport>),
}

impl Reports {
    pub fn kind(&self) -> ReportKind {
        match self {
            Reports::Snow(_) => ReportKind::Snow,
            Reports::Stargazing(_) => ReportKind::Stargazing,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Reports::Snow(r) => r.len(),
            Reports::Stargazing(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which clock decides the report dates and the night check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBasis {
    /// The zone of the machine running the program.
    #[default]
    Local,
    /// The UTC offset the API reports for the forecast city.
    Location,
}

impl TimeBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBasis::Local => "local",
            TimeBasis::Location => "location",
        }
    }
}

impl std::fmt::Display for TimeBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimeBasis {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(TimeBasis::Local),
            "location" => Ok(TimeBasis::Location),
            _ => Err(anyhow::anyhow!(
                "Unknown time basis '{value}'. Supported values: local, location."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_as_str_roundtrip() {
        for kind in ReportKind::all() {
            let parsed = ReportKind::try_from(kind.as_str()).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn report_kind_aliases() {
        assert_eq!(ReportKind::try_from("SKI").unwrap(), ReportKind::Snow);
        assert_eq!(ReportKind::try_from("stars").unwrap(), ReportKind::Stargazing);
    }

    #[test]
    fn unknown_report_error() {
        let err = ReportKind::try_from("surf").unwrap_err();
        assert!(err.to_string().contains("Unknown report"));
    }

    #[test]
    fn location_parses_coordinates() {
        let loc: Location = "45.92, 6.87".parse().unwrap();
        assert_eq!(loc, Location::Coord { lat: 45.92, lon: 6.87 });
    }

    #[test]
    fn location_with_country_is_a_city() {
        let loc: Location = "Chamonix,FR".parse().unwrap();
        assert_eq!(loc, Location::City("Chamonix,FR".to_string()));
    }

    #[test]
    fn location_rejects_empty_and_out_of_range() {
        assert_eq!("  ".parse::<Location>().unwrap_err(), LocationParseError::Empty);
        assert_eq!(
            "91,0".parse::<Location>().unwrap_err(),
            LocationParseError::Latitude(91.0)
        );
        assert_eq!(
            "0,-181".parse::<Location>().unwrap_err(),
            LocationParseError::Longitude(-181.0)
        );
    }

    #[test]
    fn count_is_clamped() {
        let req = ForecastRequest::new(Location::City("Oslo".into())).with_count(0);
        assert_eq!(req.count, Some(1));
        let req = ForecastRequest::new(Location::City("Oslo".into())).with_count(200);
        assert_eq!(req.count, Some(ForecastRequest::MAX_COUNT));
    }

    #[test]
    fn time_basis_parses() {
        assert_eq!(TimeBasis::try_from("Location").unwrap(), TimeBasis::Location);
        assert!(TimeBasis::try_from("utc").is_err());
    }
}
