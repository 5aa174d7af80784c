use serde::{Deserialize, Serialize, de::Error as _};

/// City text as typed by the user. Mutated on every edit, cloned at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// Trimmed city, or `None` when there is nothing to search for.
    pub fn searchable_city(&self) -> Option<&str> {
        let city = self.city.trim();
        (!city.is_empty()).then_some(city)
    }
}

/// Current weather as returned by `/data/2.5/weather`.
///
/// Every field is optional: the reading is kept exactly as received and the
/// card renderer decides what to show when something is missing. A field of the
/// wrong type is treated as missing instead of rejecting the whole reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub main: Option<Measurements>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub wind: Option<Wind>,
    /// Meters.
    #[serde(default, deserialize_with = "lenient::value")]
    pub visibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub sys: Option<SunTimes>,
    /// Seconds east of UTC for the queried location.
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub timezone: Option<i64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default, deserialize_with = "lenient::value")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub humidity: Option<f64>,
    /// hPa.
    #[serde(default, deserialize_with = "lenient::value")]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default, deserialize_with = "lenient::value")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub sunrise: Option<i64>,
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Coarse category used for icon selection, e.g. "Rain".
    #[serde(default, deserialize_with = "lenient::value")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub description: Option<String>,
}

/// Field deserializers that turn a malformed value into "missing".
mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;

    pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(raw).ok())
    }

    /// Unix seconds or an offset; fractional numbers are truncated.
    pub fn seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let Value::Number(number) = raw else { return Ok(None) };

        Ok(number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }))
    }

    /// Anything but an array is an empty list; an unreadable entry becomes a blank one
    /// so the first entry stays first.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let raw = Value::deserialize(deserializer)?;
        let Value::Array(items) = raw else { return Ok(Vec::new()) };

        Ok(items.into_iter().map(|item| serde_json::from_value(item).unwrap_or_default()).collect())
    }
}

impl WeatherReading {
    /// Parses a reply body. Only a body that is not a JSON object is an error.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }

    fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Condition category of the first `weather` entry; this is the icon key.
    pub fn category(&self) -> Option<&str> {
        self.primary_condition()?.main.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.primary_condition()?.description.as_deref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref()?.temp
    }

    pub fn feels_like(&self) -> Option<f64> {
        self.main.as_ref()?.feels_like
    }

    pub fn humidity(&self) -> Option<f64> {
        self.main.as_ref()?.humidity
    }

    pub fn pressure_hpa(&self) -> Option<f64> {
        self.main.as_ref()?.pressure
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind.as_ref()?.speed
    }

    pub fn sunrise(&self) -> Option<i64> {
        self.sys.as_ref()?.sunrise
    }

    pub fn sunset(&self) -> Option<i64> {
        self.sys.as_ref()?.sunset
    }
}
