//! Hazard records as they arrive from the wildfire feed

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::coordinate::{Coordinate, CoordinateError};

/// One detected hazard (a satellite heat anomaly) with the weather observed at
/// its location.
///
/// Records are immutable feed data. `location` is kept in its raw JSON form so
/// malformed entries survive parsing and are rejected only when a spatial
/// operation validates them.
///
/// Weather fields are optional: a missing, `null`, non-finite or non-numeric
/// value is absent. The feed updater stores wind speed as text such as
/// `"5.2 m/s"`, so strings that start with a number yield that number.
/// Display strings of the wrong type are absent too, and `_id` also accepts
/// a numeric id or a `{"$oid": "..."}` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HazardRecord {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub location: Value,

    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>, // °C

    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>, // %

    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed: Option<f64>, // m/s

    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_gust: Option<f64>, // m/s

    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_direction: Option<f64>, // degrees

    #[serde(default, deserialize_with = "lenient_number")]
    pub rain: Option<f64>, // mm

    #[serde(default, deserialize_with = "lenient_number")]
    pub clouds: Option<f64>, // %

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,

    #[serde(
        rename = "locationName",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location_name: Option<String>,
}

impl HazardRecord {
    /// Create a record at the given longitude/latitude with no weather data.
    ///
    /// The location is stored unvalidated, exactly as a feed would deliver it.
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self {
            location: Value::from(vec![longitude, latitude]),
            ..Self::default()
        }
    }

    /// Validate and return this record's location.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when the location is malformed or out of range.
    pub fn coordinate(&self) -> Result<Coordinate, CoordinateError> {
        Coordinate::from_value(&self.location)
    }

    /// Human-readable place name: "state, country", then country, then the
    /// location name, then a generic fallback.
    pub fn location_description(&self) -> String {
        match (non_blank(self.state.as_deref()), non_blank(self.country.as_deref())) {
            (Some(state), Some(country)) => format!("{state}, {country}"),
            (_, Some(country)) => country.to_string(),
            _ => non_blank(self.location_name.as_deref())
                .unwrap_or("this location")
                .to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = Some(percent);
        self
    }

    pub fn with_wind(mut self, speed_ms: f64, gust_ms: f64, direction_deg: f64) -> Self {
        self.wind_speed = Some(speed_ms);
        self.wind_gust = Some(gust_ms);
        self.wind_direction = Some(direction_deg);
        self
    }

    pub fn with_wind_speed(mut self, speed_ms: f64) -> Self {
        self.wind_speed = Some(speed_ms);
        self
    }

    pub fn with_clouds(mut self, percent: f64) -> Self {
        self.clouds = Some(percent);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_location_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = Some(name.into());
        self
    }
}

pub(crate) fn non_blank(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// Accept a JSON number, or a string whose first token parses as a number.
/// Everything else (including NaN/infinite results) becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok()),
        _ => None,
    };
    Ok(number.filter(|v| v.is_finite()))
}

/// Accept a string; anything else becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Accept a string, a number, or a `{"$oid": "..."}` object id.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(mut fields) => match fields.remove("$oid") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    };
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let record: HazardRecord = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "location": [-120.5, 39.1],
            "temperature": 31.5,
            "humidity": 18,
            "wind_speed": 7.2,
            "wind_gust": 11.0,
            "wind_direction": 270,
            "rain": 0,
            "clouds": 5,
            "country": "United States",
            "state": "California",
            "locationName": "Tahoe National Forest"
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("65f0c0ffee"));
        assert_eq!(record.temperature, Some(31.5));
        assert_eq!(record.humidity, Some(18.0));
        assert_eq!(record.wind_direction, Some(270.0));
        assert_eq!(record.rain, Some(0.0));
        assert_eq!(record.location_name.as_deref(), Some("Tahoe National Forest"));
        assert_eq!(
            record.coordinate().unwrap(),
            Coordinate::new(-120.5, 39.1).unwrap()
        );
    }

    #[test]
    fn test_lenient_weather_fields() {
        let record: HazardRecord = serde_json::from_value(json!({
            "location": [10.0, 10.0],
            "wind_speed": "5.2 m/s",
            "temperature": "hot",
            "humidity": null,
            "clouds": [1, 2]
        }))
        .unwrap();

        assert_eq!(record.wind_speed, Some(5.2));
        assert_eq!(record.temperature, None);
        assert_eq!(record.humidity, None);
        assert_eq!(record.clouds, None);
        assert_eq!(record.rain, None);
    }

    #[test]
    fn test_lenient_id_and_text_fields() {
        let record: HazardRecord = serde_json::from_value(json!({
            "_id": {"$oid": "65f0c0ffee"},
            "location": [10.0, 10.0],
            "country": 5,
            "state": ["New South Wales"],
            "locationName": "Kakadu"
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("65f0c0ffee"));
        assert_eq!(record.country, None);
        assert_eq!(record.state, None);
        assert_eq!(record.location_name.as_deref(), Some("Kakadu"));

        let record: HazardRecord = serde_json::from_value(json!({ "_id": 42 })).unwrap();
        assert_eq!(record.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_location_is_kept_but_invalid() {
        let record: HazardRecord = serde_json::from_value(json!({ "temperature": 20 })).unwrap();
        assert_eq!(record.location, Value::Null);
        assert!(record.coordinate().is_err());
    }

    #[test]
    fn test_location_description_fallbacks() {
        let base = HazardRecord::at(0.0, 0.0);
        assert_eq!(base.location_description(), "this location");

        let named = base.clone().with_location_name("Kakadu");
        assert_eq!(named.location_description(), "Kakadu");

        let country = named.clone().with_country("Australia");
        assert_eq!(country.location_description(), "Australia");

        let full = country.with_state("Northern Territory");
        assert_eq!(full.location_description(), "Northern Territory, Australia");

        // State alone is not enough
        let state_only = base.with_state("Victoria").with_location_name("Gippsland");
        assert_eq!(state_only.location_description(), "Gippsland");
    }

    #[test]
    fn test_at_with_non_finite_location_is_invalid() {
        let record = HazardRecord::at(f64::NAN, 10.0);
        assert!(record.coordinate().is_err());
    }
}
