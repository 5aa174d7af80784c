use crate::{Config, WeatherReading, error::FetchFailure, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather readings for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Performs exactly one request. No retry, no caching, no timeout.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchFailure>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;
    Ok(OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url()))
}
