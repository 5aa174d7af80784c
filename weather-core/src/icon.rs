/// Display asset for a condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconAsset {
    Thunderstorm,
    Drizzle,
    Rain,
    Fog,
    Sun,
    Cloudy,
    Snowy,
}

impl IconAsset {
    /// Image file name of the asset.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconAsset::Thunderstorm => "thunderstorm.png",
            IconAsset::Drizzle => "drizzle.png",
            IconAsset::Rain => "rain.png",
            IconAsset::Fog => "fog.png",
            IconAsset::Sun => "sun.png",
            IconAsset::Cloudy => "cloudy.png",
            IconAsset::Snowy => "snowy.png",
        }
    }

    /// Single-glyph stand-in used by text renderers.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconAsset::Thunderstorm => "⛈",
            IconAsset::Drizzle => "🌦",
            IconAsset::Rain => "🌧",
            IconAsset::Fog => "🌫",
            IconAsset::Sun => "☀",
            IconAsset::Cloudy => "☁",
            IconAsset::Snowy => "❄",
        }
    }
}

impl std::fmt::Display for IconAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ICON_TABLE: &[(&str, IconAsset)] = &[
    ("Thunderstorm", IconAsset::Thunderstorm),
    ("Drizzle", IconAsset::Drizzle),
    ("Rain", IconAsset::Rain),
    ("Fog", IconAsset::Fog),
    ("Haze", IconAsset::Fog),
    ("Mist", IconAsset::Fog),
    ("Dust", IconAsset::Fog),
    ("Sand", IconAsset::Fog),
    ("Ash", IconAsset::Fog),
    ("Squall", IconAsset::Fog),
    ("Tornado", IconAsset::Fog),
    ("Clear", IconAsset::Sun),
    ("Clouds", IconAsset::Cloudy),
    ("Snow", IconAsset::Snowy),
];

/// Exact, case-sensitive lookup. Unknown categories have no icon.
pub fn resolve_icon(category: &str) -> Option<IconAsset> {
    ICON_TABLE
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, asset)| *asset)
}
