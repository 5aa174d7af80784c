use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{config::DEFAULT_BASE_URL, error::FetchFailure, model::WeatherReading};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CURRENT_WEATHER_PATH);
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchFailure> {
        if city.trim().is_empty() {
            return Err(FetchFailure::EmptyCity);
        }

        // reqwest percent-encodes the query pairs.
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, "OpenWeather current request failed");
            return Err(FetchFailure::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let reading = WeatherReading::from_json(&body)?;
        debug!(name = ?reading.name, category = ?reading.category(), "received current weather");

        Ok(reading)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
