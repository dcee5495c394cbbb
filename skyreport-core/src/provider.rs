use crate::{
    Config,
    forecast::ForecastResponse,
    model::{ForecastRequest, ReportKind, Reports, TimeBasis},
    provider::openweather::OpenWeatherProvider,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Local;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> anyhow::Result<ForecastResponse>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    provider_with_key(config.api_key(), config)
}

fn provider_with_key(
    api_key: Option<String>,
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skyreport configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key, config.base_url())))
}

/// A mapped forecast together with where it is for.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub location_name: Option<String>,
    pub reports: Reports,
}

/// Map an already fetched payload on the requested clock.
///
/// `TimeBasis::Location` falls back to the local zone when the payload has no
/// usable city offset.
pub fn map_forecast(
    response: &ForecastResponse,
    kind: ReportKind,
    basis: TimeBasis,
) -> anyhow::Result<Forecast> {
    let reports = match (basis, response.location_offset()) {
        (TimeBasis::Location, Some(offset)) => response.to_reports(kind, &offset),
        (TimeBasis::Location, None) => {
            tracing::warn!("forecast has no city offset, using local time");
            response.to_reports(kind, &Local)
        }
        (TimeBasis::Local, _) => response.to_reports(kind, &Local),
    }
    .context("Failed to map forecast into reports")?;

    Ok(Forecast {
        location_name: response.location_name(),
        reports,
    })
}

/// Fetch a forecast and map it.
pub async fn fetch_reports(
    provider: &dyn ForecastProvider,
    request: &ForecastRequest,
    kind: ReportKind,
    basis: TimeBasis,
) -> anyhow::Result<Forecast> {
    let response = provider.fetch_forecast(request).await?;
    map_forecast(&response, kind, basis)
}
