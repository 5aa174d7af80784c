//! Pure conversions from API timestamps and strings into display text.

use chrono::{DateTime, Datelike, Duration, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// `HH:MM` in UTC for a Unix timestamp in seconds.
///
/// No host timezone is applied. Add the location's offset before calling if a
/// local wall-clock time is wanted.
pub fn format_clock_time(unix_seconds: i64) -> String {
    let second_of_day = unix_seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = second_of_day / 3600;
    let minutes = (second_of_day % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

/// `D-Month-YYYY` from the UTC calendar fields, e.g. `5-January-2023`.
pub fn format_full_date(date: DateTime<Utc>) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{}-{}-{}", date.day(), month, date.year())
}

pub fn weekday_name(date: DateTime<Utc>) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Shifts a UTC instant by a provider timezone offset so that its UTC fields read
/// as the location's wall clock. `None` when the result is outside chrono's range.
pub fn local_datetime(now: DateTime<Utc>, offset_seconds: i64) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(offset_seconds)?)
}

/// Uppercases the first character of every word, leaving the rest untouched.
///
/// A word starts at an ASCII alphanumeric or `_` that does not follow another one.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !in_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        in_word = is_word;
    }

    out
}
