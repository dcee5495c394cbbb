//! OpenWeather five-day forecast payload and its mapping into reports.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    classify::{self, ConditionCode},
    model::{ReportKind, Reports, SnowReport, StargazingReport},
};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("forecast timestamp {0} is outside the representable date range")]
    InvalidTimestamp(i64),
}

/// Body of `GET /data/2.5/forecast`, temperatures in Kelvin.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub city: Option<City>,
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// UNIX time of the slot, seconds.
    pub dt: i64,
    pub main: Temperature,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Temperature {
    /// Kelvin.
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub id: u16,
    #[serde(rename = "main")]
    pub title: String,
    pub description: String,
}

/// Fields shared by both report kinds.
struct Slot {
    date: DateTime<FixedOffset>,
    code: Option<ConditionCode>,
    temperature_celsius: i32,
    title: String,
    description: String,
}

impl Slot {
    fn is(&self, pred: fn(ConditionCode) -> bool) -> bool {
        self.code.is_some_and(pred)
    }

    fn is_night(&self) -> bool {
        classify::is_night(self.date.hour())
    }
}

impl ForecastEntry {
    fn slot<Tz: TimeZone>(&self, tz: &Tz) -> Result<Slot, MappingError> {
        let date = DateTime::from_timestamp(self.dt, 0)
            .ok_or(MappingError::InvalidTimestamp(self.dt))?
            .with_timezone(tz)
            .fixed_offset();

        // Only the first condition counts; OpenWeather lists the primary one first.
        let first = self.weather.first();

        Ok(Slot {
            date,
            code: first.map(|c| ConditionCode(c.id)),
            temperature_celsius: classify::kelvin_to_celsius(self.main.temp),
            title: first.map_or_else(|| UNKNOWN.to_string(), |c| c.title.clone()),
            description: first.map_or_else(|| UNKNOWN.to_string(), |c| c.description.clone()),
        })
    }

    pub fn to_snow_report<Tz: TimeZone>(&self, tz: &Tz) -> Result<SnowReport, MappingError> {
        let slot = self.slot(tz)?;
        Ok(SnowReport {
            is_raining: slot.is(ConditionCode::is_rain),
            is_snowing: slot.is(ConditionCode::is_snow),
            date: slot.date,
            temperature_celsius: slot.temperature_celsius,
            weather_title: slot.title,
            weather_description: slot.description,
        })
    }

    pub fn to_stargazing_report<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<StargazingReport, MappingError> {
        let slot = self.slot(tz)?;
        Ok(StargazingReport {
            is_good_for_stargazing: slot.is(ConditionCode::is_clear_sky) && slot.is_night(),
            date: slot.date,
            temperature_celsius: slot.temperature_celsius,
            weather_title: slot.title,
            weather_description: slot.description,
        })
    }
}

impl ForecastResponse {
    pub fn to_snow_reports<Tz: TimeZone>(&self, tz: &Tz) -> Result<Vec<SnowReport>, MappingError> {
        self.list.iter().map(|e| e.to_snow_report(tz)).collect()
    }

    pub fn to_stargazing_reports<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<Vec<StargazingReport>, MappingError> {
        self.list.iter().map(|e| e.to_stargazing_report(tz)).collect()
    }

    pub fn to_reports<Tz: TimeZone>(
        &self,
        kind: ReportKind,
        tz: &Tz,
    ) -> Result<Reports, MappingError> {
        tracing::debug!(%kind, entries = self.list.len(), "mapping forecast");
        match kind {
            ReportKind::Snow => self.to_snow_reports(tz).map(Reports::Snow),
            ReportKind::Stargazing => self.to_stargazing_reports(tz).map(Reports::Stargazing),
        }
    }

    /// UTC offset of the forecast city, when the payload carries a valid one.
    pub fn location_offset(&self) -> Option<FixedOffset> {
        self.city
            .as_ref()
            .and_then(|c| c.timezone)
            .and_then(FixedOffset::east_opt)
    }

    /// "Name, CC" when the payload names its city.
    pub fn location_name(&self) -> Option<String> {
        self.city.as_ref().map(|c| match &c.country {
            Some(country) if !country.is_empty() => format!("{}, {}", c.name, country),
            _ => c.name.clone(),
        })
    }
}
