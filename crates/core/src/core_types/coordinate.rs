//! Longitude/latitude pairs and their validation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::units::{Degrees, Radians};

/// Fallback observer position used when no geolocation is available.
pub const DEFAULT_OBSERVER: Coordinate = Coordinate {
    longitude: 0.0,
    latitude: 0.0,
};

/// A validated (longitude, latitude) pair in degrees.
///
/// Both components are finite; longitude lies in [-180, 180] and latitude in
/// [-90, 90]. On the wire a coordinate is the two-element array `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range components.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] describing the first component that fails.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Validate a raw feed location: a JSON array of exactly two numbers.
    ///
    /// Numeric strings are rejected; only JSON numbers count.
    ///
    /// # Errors
    /// Returns [`CoordinateError::Malformed`] when the value is not a pair of
    /// numbers, or a range error from [`Coordinate::new`].
    pub fn from_value(value: &Value) -> Result<Self, CoordinateError> {
        let pair = match value {
            Value::Array(items) if items.len() == 2 => items,
            Value::Array(items) => {
                return Err(CoordinateError::Malformed(format!(
                    "expected 2 components, got {}",
                    items.len()
                )))
            }
            Value::Null => return Err(CoordinateError::Malformed("missing location".into())),
            other => {
                return Err(CoordinateError::Malformed(format!(
                    "expected [longitude, latitude], got {other}"
                )))
            }
        };

        match (pair[0].as_f64(), pair[1].as_f64()) {
            (Some(longitude), Some(latitude)) => Self::new(longitude, latitude),
            _ => Err(CoordinateError::Malformed(format!(
                "components must be numbers, got {value}"
            ))),
        }
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Latitude and longitude in radians, in that order.
    #[inline]
    pub fn to_radians(&self) -> (Radians, Radians) {
        (
            Degrees::new(self.latitude).to_radians(),
            Degrees::new(self.longitude).to_radians(),
        )
    }

    /// Build from components the caller has already range-checked.
    pub(crate) fn from_valid(longitude: f64, latitude: f64) -> Self {
        debug_assert!(Self::new(longitude, latitude).is_ok());
        Self {
            longitude,
            latitude,
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        DEFAULT_OBSERVER
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> [f64; 2] {
        [c.longitude, c.latitude]
    }
}

/// Formats as `"12.3456° E, 45.6789° N"`, longitude first.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lon_dir = if self.longitude >= 0.0 { 'E' } else { 'W' };
        let lat_dir = if self.latitude >= 0.0 { 'N' } else { 'S' };
        write!(
            f,
            "{} {lon_dir}, {} {lat_dir}",
            Degrees::new(self.longitude.abs()),
            Degrees::new(self.latitude.abs()),
        )
    }
}

/// Why a location failed validation
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// Not a two-element array of numbers
    Malformed(String),
    /// NaN or infinite component
    NonFinite,
    /// Longitude outside [-180, 180]
    LongitudeOutOfRange(f64),
    /// Latitude outside [-90, 90]
    LatitudeOutOfRange(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::Malformed(msg) => write!(f, "Malformed location: {msg}"),
            CoordinateError::NonFinite => write!(f, "Location components must be finite"),
            CoordinateError::LongitudeOutOfRange(v) => {
                write!(f, "Longitude {v} outside [-180, 180]")
            }
            CoordinateError::LatitudeOutOfRange(v) => write!(f, "Latitude {v} outside [-90, 90]"),
        }
    }
}

impl std::error::Error for CoordinateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_ranges() {
        assert!(Coordinate::new(-180.0, -90.0).is_ok());
        assert!(Coordinate::new(180.0, 90.0).is_ok());
        assert_eq!(
            Coordinate::new(200.0, 10.0),
            Err(CoordinateError::LongitudeOutOfRange(200.0))
        );
        assert_eq!(
            Coordinate::new(10.0, -90.5),
            Err(CoordinateError::LatitudeOutOfRange(-90.5))
        );
        assert_eq!(Coordinate::new(f64::NAN, 0.0), Err(CoordinateError::NonFinite));
        assert_eq!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(CoordinateError::NonFinite)
        );
    }

    #[test]
    fn test_from_value_accepts_numeric_pair() {
        let c = Coordinate::from_value(&json!([-122.5, 38.25])).unwrap();
        assert_eq!(c.longitude(), -122.5);
        assert_eq!(c.latitude(), 38.25);

        // Integers are numbers too
        let c = Coordinate::from_value(&json!([10, -5])).unwrap();
        assert_eq!(c.longitude(), 10.0);
        assert_eq!(c.latitude(), -5.0);
    }

    #[test]
    fn test_from_value_rejects_malformed() {
        let malformed = [
            json!(null),
            json!([]),
            json!([1.0]),
            json!([1.0, 2.0, 3.0]),
            json!(["-122.5", "38.25"]),
            json!([1.0, null]),
            json!({"lng": 1.0, "lat": 2.0}),
            json!("1.0,2.0"),
        ];
        for value in &malformed {
            assert!(
                matches!(
                    Coordinate::from_value(value),
                    Err(CoordinateError::Malformed(_))
                ),
                "{value} should be malformed"
            );
        }
    }

    #[test]
    fn test_serde_pair_form() {
        let c: Coordinate = serde_json::from_str("[151.2, -33.8]").unwrap();
        assert_eq!(c, Coordinate::new(151.2, -33.8).unwrap());
        assert_eq!(serde_json::to_string(&c).unwrap(), "[151.2,-33.8]");

        let bad: Result<Coordinate, _> = serde_json::from_str("[200.0, 10.0]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display_hemispheres() {
        let c = Coordinate::new(-122.419_42, 37.774_93).unwrap();
        assert_eq!(c.to_string(), "122.4194° W, 37.7749° N");

        let c = Coordinate::new(151.209_3, -33.868_8).unwrap();
        assert_eq!(c.to_string(), "151.2093° E, 33.8688° S");

        assert_eq!(DEFAULT_OBSERVER.to_string(), "0.0000° E, 0.0000° N");
    }
}
