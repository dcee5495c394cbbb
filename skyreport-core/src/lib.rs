//! Core library for the `skyreport` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast client
//! - Mapping of forecast slots into snow and stargazing reports
//!
//! It is used by `skyreport-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod forecast;
pub mod model;
pub mod provider;

pub use config::Config;
pub use forecast::{ForecastResponse, MappingError};
pub use model::{
    ForecastRequest, Location, ReportKind, Reports, SnowReport, StargazingReport, TimeBasis,
};
pub use provider::{Forecast, ForecastProvider, fetch_reports, map_forecast};
