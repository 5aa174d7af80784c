use weather_core::{
    WeatherCards,
    cards::{ATTRIBUTION_TEXT, ATTRIBUTION_URL},
};

const LABEL_WIDTH: usize = 14;
const RULE: &str = "────────────────────────────";

/// Lays the cards out as plain text, one card per line.
pub fn format_cards(cards: &WeatherCards) -> String {
    let mut out = String::new();

    let icon = match cards.icon {
        Some(asset) => format!("{} {}", asset.glyph(), cards.icon_alt),
        None if cards.icon_alt.is_empty() => "?".to_string(),
        None => format!("? {}", cards.icon_alt),
    };
    let location = cards.location.as_deref().unwrap_or_default();

    out.push_str(&format!("{icon}  {location}\n"));
    out.push_str(&format!("{}  {}\n", cards.temperature, cards.description));
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("{}  {}  {}\n\n", cards.local_time, cards.full_date, cards.weekday));

    for card in &cards.details {
        out.push_str(&format!("{:<LABEL_WIDTH$}{}\n", card.label, card.value));
    }

    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("{ATTRIBUTION_TEXT}  {ATTRIBUTION_URL}\n"));

    out
}
