use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance when checking that weights sum to 1
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative importance of each factor. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub distance: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub cloud_cover: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            distance: 0.4,
            temperature: 0.2,
            wind_speed: 0.2,
            humidity: 0.1,
            cloud_cover: 0.1,
        }
    }
}

impl RiskWeights {
    pub fn sum(&self) -> f64 {
        self.distance + self.temperature + self.wind_speed + self.humidity + self.cloud_cover
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("distance", self.distance),
            ("temperature", self.temperature),
            ("wind_speed", self.wind_speed),
            ("humidity", self.humidity),
            ("cloud_cover", self.cloud_cover),
        ]
    }
}

/// Parameters of the risk heuristic.
///
/// The default is the model used by the wildfire map: distance loses 2 points
/// per km (nothing beyond 50 km), temperature saturates at 50 °C and wind at
/// 30 m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModel {
    pub weights: RiskWeights,
    /// Sub-score points lost per kilometer of distance
    pub distance_decay_per_km: f64,
    /// Temperature at which the temperature sub-score reaches 100
    pub temperature_ceiling_c: f64,
    /// Wind speed at which the wind sub-score reaches 100
    pub wind_ceiling_ms: f64,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            distance_decay_per_km: 2.0,
            temperature_ceiling_c: 50.0,
            wind_ceiling_ms: 30.0,
        }
    }
}

impl RiskModel {
    /// Load a model from JSON. Missing fields take their default values.
    ///
    /// # Errors
    /// Returns error if the JSON cannot be parsed or the model is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, RiskModelError> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| RiskModelError::ParseFailed(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Check that the model keeps every score inside [0, 100].
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), RiskModelError> {
        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RiskModelError::InvalidWeight { name, value: weight });
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RiskModelError::WeightsDoNotSumToOne(sum));
        }

        if !self.distance_decay_per_km.is_finite() || self.distance_decay_per_km < 0.0 {
            return Err(RiskModelError::InvalidParameter {
                name: "distance_decay_per_km",
                value: self.distance_decay_per_km,
            });
        }

        for (name, ceiling) in [
            ("temperature_ceiling_c", self.temperature_ceiling_c),
            ("wind_ceiling_ms", self.wind_ceiling_ms),
        ] {
            if !ceiling.is_finite() || ceiling <= 0.0 {
                return Err(RiskModelError::InvalidParameter {
                    name,
                    value: ceiling,
                });
            }
        }

        Ok(())
    }
}

/// Errors from loading or validating a [`RiskModel`]
#[derive(Debug, Clone, PartialEq)]
pub enum RiskModelError {
    /// Model JSON could not be parsed
    ParseFailed(String),
    /// A weight is negative or not finite
    InvalidWeight { name: &'static str, value: f64 },
    /// Weights must add up to exactly 1
    WeightsDoNotSumToOne(f64),
    /// A normalization parameter is out of range
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for RiskModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskModelError::ParseFailed(msg) => write!(f, "Failed to parse risk model: {msg}"),
            RiskModelError::InvalidWeight { name, value } => {
                write!(f, "Weight '{name}' must be finite and non-negative, got {value}")
            }
            RiskModelError::WeightsDoNotSumToOne(sum) => {
                write!(f, "Weights must sum to 1.0, got {sum}")
            }
            RiskModelError::InvalidParameter { name, value } => {
                write!(f, "Parameter '{name}' is out of range, got {value}")
            }
        }
    }
}

impl std::error::Error for RiskModelError {}
