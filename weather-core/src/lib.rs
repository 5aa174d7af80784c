//! Core library for the `weather` cards client.
//!
//! This crate defines:
//! - Configuration (API key, default city)
//! - The OpenWeather provider behind the `WeatherProvider` trait
//! - The API-shaped reading model and the text formatters/icon table applied to it
//! - View state, its reducer and the session that runs fetches for it
//!
//! It is used by `weather-cli`, but the state and card layers carry no terminal
//! assumptions and can drive any other front end.

pub mod cards;
pub mod config;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;

pub use cards::{Card, WeatherCards, render};
pub use config::Config;
pub use error::FetchFailure;
pub use icon::{IconAsset, resolve_icon};
pub use model::{WeatherQuery, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{Notifier, Session};
pub use state::{Effect, Event, Phase, RequestId, ViewState, reduce};
