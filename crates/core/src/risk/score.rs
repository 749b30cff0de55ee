use serde::{Deserialize, Serialize};
use std::fmt;

use super::level::{classify_risk, RiskLevel};
use super::model::RiskModel;
use crate::core_types::{HazardRecord, Kilometers};

/// Highest possible score
const MAX_SCORE: f64 = 100.0;

/// Raw factor values fed into the model. `None` counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskInputs {
    pub distance_km: Option<f64>,
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub clouds_pct: Option<f64>,
}

impl RiskInputs {
    /// Inputs for a hazard at a known distance from the observer.
    pub fn for_hazard(hazard: &HazardRecord, distance: Kilometers) -> Self {
        Self {
            distance_km: Some(distance.value()),
            temperature_c: hazard.temperature,
            wind_speed_ms: hazard.wind_speed,
            humidity_pct: hazard.humidity,
            clouds_pct: hazard.clouds,
        }
    }
}

/// Per-factor scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub distance: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub cloud_cover: f64,
}

/// Integer risk score in [0, 100]. Deserializing a larger value fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Returns `None` for values above 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> RiskLevel {
        classify_risk(i64::from(self.0))
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ScoreOutOfRange(value))
    }
}

/// A score above 100 was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutOfRange(pub u8);

impl fmt::Display for ScoreOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "risk score {} outside [0, 100]", self.0)
    }
}

impl std::error::Error for ScoreOutOfRange {}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> u8 {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl RiskModel {
    /// Normalize each factor to [0, 100].
    pub fn sub_scores(&self, inputs: &RiskInputs) -> SubScores {
        let distance = present(inputs.distance_km);
        let temperature = present(inputs.temperature_c);
        let wind_speed = present(inputs.wind_speed_ms);
        let humidity = present(inputs.humidity_pct);
        let clouds = present(inputs.clouds_pct);

        SubScores {
            // closer => higher risk
            distance: bounded(MAX_SCORE - distance * self.distance_decay_per_km),
            // hotter => higher risk
            temperature: bounded(temperature / self.temperature_ceiling_c * MAX_SCORE),
            // windier => higher risk
            wind_speed: bounded(wind_speed / self.wind_ceiling_ms * MAX_SCORE),
            // drier => higher risk
            humidity: bounded(MAX_SCORE - humidity),
            // clearer => higher risk
            cloud_cover: bounded(MAX_SCORE - clouds),
        }
    }

    /// Weighted sum of the sub-scores, rounded half-up.
    pub fn score(&self, inputs: &RiskInputs) -> RiskScore {
        let s = self.sub_scores(inputs);
        let w = &self.weights;
        let weighted = w.distance * s.distance
            + w.temperature * s.temperature
            + w.wind_speed * s.wind_speed
            + w.humidity * s.humidity
            + w.cloud_cover * s.cloud_cover;

        RiskScore(bounded((weighted + 0.5).floor()) as u8)
    }
}

/// Score with the default model. Never fails: non-finite inputs count as zero.
///
/// ```
/// use fire_risk_core::risk_score;
///
/// assert_eq!(risk_score(0.0, 50.0, 30.0, 0.0, 0.0).value(), 100);
/// assert_eq!(risk_score(100.0, 0.0, 0.0, 100.0, 100.0).value(), 0);
/// ```
pub fn risk_score(
    distance_km: f64,
    temperature_c: f64,
    wind_speed_ms: f64,
    humidity_pct: f64,
    clouds_pct: f64,
) -> RiskScore {
    RiskModel::default().score(&RiskInputs {
        distance_km: Some(distance_km),
        temperature_c: Some(temperature_c),
        wind_speed_ms: Some(wind_speed_ms),
        humidity_pct: Some(humidity_pct),
        clouds_pct: Some(clouds_pct),
    })
}

#[inline]
fn present(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Clamp into [0, 100]; NaN maps to 0.
#[inline]
fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}
