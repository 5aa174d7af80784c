use thiserror::Error;

/// Why a single weather fetch did not produce a reading.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("city name is empty")]
    EmptyCity,

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach OpenWeather: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse OpenWeather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchFailure {
    /// Short text suitable for a one-line user notice.
    pub fn notice(&self) -> String {
        match self {
            FetchFailure::Status { status, .. } => format!("Weather API error (HTTP {status})"),
            other => format!("Weather API error: {other}"),
        }
    }
}
