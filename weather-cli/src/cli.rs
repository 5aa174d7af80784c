use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_core::{Config, Event, Session, ViewState, provider_from_config, render};

use crate::{render::format_cards, watch};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city, as cards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Fetch once and print the cards.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the raw reading as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Interactive view: edit the city and search repeatedly.
    Watch {
        /// Initial city; defaults to the configured city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Watch { city } => {
                let session = session_for(city)?;
                watch::run(session).await
            }
        }
    }
}

/// Prints failure notices to stderr, away from the cards on stdout.
pub struct StderrNotifier;

impl weather_core::Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

fn session_for(city: Option<String>) -> anyhow::Result<Session> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let city = city.unwrap_or_else(|| config.default_city.clone());

    Ok(Session::new(Arc::new(provider), ViewState::new(city)))
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut session = session_for(city)?;
    let mut notifier = StderrNotifier;

    if session.state().query.searchable_city().is_none() {
        bail!("City name is empty");
    }

    session.dispatch(Event::Mounted, &mut notifier);
    session.run_until_idle(&mut notifier).await;

    let state = session.state();
    let Some(reading) = state.reading.as_ref() else {
        bail!("No weather for '{}'", state.query.city.trim());
    };

    if json {
        let text = serde_json::to_string_pretty(reading).context("Failed to serialize reading")?;
        println!("{text}");
    } else if let Some(cards) = render(state, Utc::now()) {
        print!("{}", format_cards(&cards));
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_from_file()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !key.trim().is_empty() {
        config.set_api_key(key.trim().to_string());
    }

    let city = Text::new("Default city:").with_default(&config.default_city).prompt()?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
