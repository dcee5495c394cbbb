use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    forecast::ForecastResponse,
    model::{ForecastRequest, Location},
};

use super::ForecastProvider;

const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "OpenWeather rejected the API key (401).\n\
         Hint: run `skyreport configure` or set OPENWEATHER_API_KEY."
    )]
    Unauthorized,

    #[error("OpenWeather forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }

    /// Query pairs without the key. No `units`: the mapping expects Kelvin.
    fn query(request: &ForecastRequest) -> Vec<(&'static str, String)> {
        let mut query = match &request.location {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coord { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        if let Some(cnt) = request.count {
            query.push(("cnt", cnt.to_string()));
        }
        query
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = self.forecast_url();
        let query = Self::query(request);
        tracing::info!(%url, ?query, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            // The URL carries the key; keep it out of error text.
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to OpenWeather (5-day forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read OpenWeather forecast response body")?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: truncate_body(&body),
            }
            .into());
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        tracing::debug!(entries = parsed.list.len(), "forecast received");
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
