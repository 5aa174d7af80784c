//! Display composition. Every value is derived from the stored reading at render
//! time; nothing here is cached between renders.

use chrono::{DateTime, Utc};

use crate::{
    format::{capitalize_words, format_clock_time, format_full_date, local_datetime, weekday_name},
    icon::{IconAsset, resolve_icon},
    model::WeatherReading,
    state::ViewState,
};

/// Shown in place of any value whose inputs are missing.
pub const PLACEHOLDER: &str = "--";

pub const HPA_PER_MMHG: f64 = 1.333;

pub const ATTRIBUTION_TEXT: &str = "© Open Weather";
pub const ATTRIBUTION_URL: &str = "https://openweathermap.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: &'static str,
    pub value: String,
}

/// Everything the view shows for one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCards {
    pub location: Option<String>,
    pub icon: Option<IconAsset>,
    /// Alternate text for the icon; the raw icon key.
    pub icon_alt: String,
    pub temperature: String,
    pub description: String,
    pub local_time: String,
    pub full_date: String,
    pub weekday: String,
    pub details: Vec<Card>,
}

/// Renders the state's reading, or `None` before the first successful fetch.
pub fn render(state: &ViewState, now: DateTime<Utc>) -> Option<WeatherCards> {
    let reading = state.reading.as_ref()?;
    Some(compose(reading, state.icon_key.as_deref(), now))
}

/// Builds the cards for a reading and the icon key stored alongside it.
pub fn compose(reading: &WeatherReading, icon_key: Option<&str>, now: DateTime<Utc>) -> WeatherCards {
    let local_now = reading.timezone.and_then(|offset| local_datetime(now, offset));

    WeatherCards {
        location: reading.name.clone(),
        icon: icon_key.and_then(resolve_icon),
        icon_alt: icon_key.unwrap_or_default().to_string(),
        temperature: degrees(reading.temperature()),
        description: reading.description().map(capitalize_words).unwrap_or_else(placeholder),
        local_time: text(local_now.map(|t| format_clock_time(t.timestamp()))),
        full_date: text(local_now.map(format_full_date)),
        weekday: text(local_now.map(|t| weekday_name(t).to_string())),
        details: vec![
            Card { label: "Real Feel", value: degrees(reading.feels_like()) },
            Card { label: "Humidity", value: with_unit(reading.humidity().map(truncate), "%") },
            Card {
                label: "Pressure",
                value: with_unit(reading.pressure_hpa().map(hpa_to_mmhg), " mmHg"),
            },
            Card {
                label: "Visibility",
                value: with_unit(reading.visibility.map(meters_to_km), " km"),
            },
            Card { label: "Wind", value: with_unit(reading.wind_speed().map(truncate), " m/sec") },
            Card { label: "Sunrise Time", value: local_clock(reading.sunrise(), reading.timezone) },
            Card { label: "Sunset Time", value: local_clock(reading.sunset(), reading.timezone) },
        ],
    }
}

pub fn hpa_to_mmhg(hpa: f64) -> i64 {
    truncate(hpa / HPA_PER_MMHG)
}

pub fn meters_to_km(meters: f64) -> i64 {
    truncate(meters / 1000.0)
}

/// Truncates toward zero. Non-finite input saturates per `as` semantics.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn local_clock(timestamp: Option<i64>, offset: Option<i64>) -> String {
    text(timestamp.zip(offset).and_then(|(ts, offset)| ts.checked_add(offset)).map(format_clock_time))
}

fn degrees(value: Option<f64>) -> String {
    with_unit(value.map(truncate), "°C")
}

fn with_unit(value: Option<i64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => format!("{PLACEHOLDER}{unit}"),
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_else(placeholder)
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Condition, Measurements, SunTimes, Wind},
        state::{Event, RequestId, reduce},
    };
    use chrono::TimeZone;

    fn moscow() -> WeatherReading {
        WeatherReading {
            name: Some("Moscow".into()),
            main: Some(Measurements {
                temp: Some(12.7),
                feels_like: Some(-0.6),
                humidity: Some(81.0),
                pressure: Some(1013.0),
            }),
            wind: Some(Wind { speed: Some(4.9) }),
            visibility: Some(9999.0),
            sys: Some(SunTimes { sunrise: Some(1696132400), sunset: Some(1696173900) }),
            timezone: Some(10800),
            weather: vec![Condition {
                main: Some("Rain".into()),
                description: Some("light rain".into()),
            }],
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 1, 22, 15, 0).unwrap()
    }

    fn detail<'a>(cards: &'a WeatherCards, label: &str) -> &'a str {
        &cards.details.iter().find(|c| c.label == label).unwrap().value
    }

    #[test]
    fn pressure_converts_hpa_to_mmhg() {
        assert_eq!(hpa_to_mmhg(1013.0), 760);
    }

    #[test]
    fn composes_every_card() {
        let cards = compose(&moscow(), Some("Rain"), noon());

        assert_eq!(cards.location.as_deref(), Some("Moscow"));
        assert_eq!(cards.icon, Some(IconAsset::Rain));
        assert_eq!(cards.icon_alt, "Rain");
        assert_eq!(cards.temperature, "12°C");
        assert_eq!(cards.description, "Light Rain");
        // 22:15 UTC + 3h crosses into the next local day.
        assert_eq!(cards.local_time, "01:15");
        assert_eq!(cards.full_date, "2-October-2023");
        assert_eq!(cards.weekday, "Monday");

        assert_eq!(detail(&cards, "Real Feel"), "0°C");
        assert_eq!(detail(&cards, "Humidity"), "81%");
        assert_eq!(detail(&cards, "Pressure"), "760 mmHg");
        assert_eq!(detail(&cards, "Visibility"), "9 km");
        assert_eq!(detail(&cards, "Wind"), "4 m/sec");
        assert_eq!(detail(&cards, "Sunrise Time"), "06:53");
        assert_eq!(detail(&cards, "Sunset Time"), "18:25");
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let cards = compose(&WeatherReading::default(), None, noon());

        assert_eq!(cards.icon, None);
        assert_eq!(cards.icon_alt, "");
        assert_eq!(cards.temperature, "--°C");
        assert_eq!(cards.description, PLACEHOLDER);
        assert_eq!(cards.local_time, PLACEHOLDER);
        assert_eq!(cards.full_date, PLACEHOLDER);
        assert_eq!(cards.weekday, PLACEHOLDER);
        assert_eq!(detail(&cards, "Pressure"), "-- mmHg");
        assert_eq!(detail(&cards, "Sunrise Time"), PLACEHOLDER);
    }

    #[test]
    fn huge_timezone_blanks_local_time() {
        let mut reading = moscow();
        reading.timezone = Some(10_000_000_000_000);

        let cards = compose(&reading, Some("Rain"), noon());

        assert_eq!(cards.local_time, PLACEHOLDER);
        assert_eq!(cards.full_date, PLACEHOLDER);
        assert_eq!(cards.weekday, PLACEHOLDER);
        assert_eq!(cards.temperature, "12°C");
    }

    #[test]
    fn timezone_at_chrono_limit_blanks_local_time() {
        let mut reading = moscow();
        reading.timezone = Some(i64::MIN);

        let cards = compose(&reading, None, noon());

        assert_eq!(cards.local_time, PLACEHOLDER);
        assert_eq!(cards.full_date, PLACEHOLDER);
        assert_eq!(cards.weekday, PLACEHOLDER);
    }

    #[test]
    fn overflowing_sunrise_blanks_that_card_only() {
        let reading = WeatherReading::from_json(
            r#"{"timezone": 3600, "sys": {"sunrise": 9223372036854775807, "sunset": 1696173900}}"#,
        )
        .unwrap();

        let cards = compose(&reading, None, noon());

        assert_eq!(detail(&cards, "Sunrise Time"), PLACEHOLDER);
        assert_eq!(detail(&cards, "Sunset Time"), "16:25");
        assert_eq!(cards.local_time, "23:15");
    }

    #[test]
    fn unknown_category_renders_without_icon() {
        let mut reading = moscow();
        reading.weather[0].main = Some("Smoke".into());

        let cards = compose(&reading, reading.category(), noon());

        assert_eq!(cards.icon, None);
        assert_eq!(cards.icon_alt, "Smoke");
    }

    #[test]
    fn nothing_to_render_before_first_reading() {
        assert!(render(&ViewState::new("Moscow"), noon()).is_none());
    }

    #[test]
    fn render_follows_the_stored_reading() {
        let (state, _) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (state, _) =
            reduce(state, Event::FetchSucceeded { request_id: RequestId(1), reading: moscow() });
        let first = render(&state, noon()).unwrap();

        let mut colder = moscow();
        colder.main.as_mut().unwrap().temp = Some(-7.9);
        colder.main.as_mut().unwrap().pressure = Some(990.0);
        colder.weather[0].main = Some("Snow".into());
        colder.timezone = Some(0);

        let (state, _) = reduce(state, Event::SearchRequested);
        let (state, _) =
            reduce(state, Event::FetchSucceeded { request_id: RequestId(2), reading: colder });
        let second = render(&state, noon()).unwrap();

        assert_eq!(first.temperature, "12°C");
        assert_eq!(second.temperature, "-7°C");
        assert_eq!(detail(&second, "Pressure"), "742 mmHg");
        assert_eq!(second.icon, Some(IconAsset::Snowy));
        assert_eq!(second.local_time, "22:15");
        assert_eq!(second.full_date, "1-October-2023");
        assert_eq!(detail(&second, "Sunrise Time"), "03:53");
    }
}
