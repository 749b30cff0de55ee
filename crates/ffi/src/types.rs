//! C-compatible types shared with the host map.

use fire_risk_core::{HazardRecord, RiskAssessment, RiskLevel};

use crate::helpers::reading;

/// Longitude/latitude pair in degrees.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRiskCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// One hazard as the host holds it.
///
/// Weather readings use NaN for "not reported". A hazard whose location is
/// non-finite or out of range is skipped by the search.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRiskHazard {
    pub location: FireRiskCoordinate,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub clouds: f64,
}

impl FireRiskHazard {
    pub(crate) fn to_record(self) -> HazardRecord {
        HazardRecord {
            temperature: reading(self.temperature),
            humidity: reading(self.humidity),
            wind_speed: reading(self.wind_speed),
            clouds: reading(self.clouds),
            ..HazardRecord::at(self.location.longitude, self.location.latitude)
        }
    }
}

/// Risk band, matching `fire_risk_core::RiskLevel`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRiskLevel {
    Low = 0,
    Moderate = 1,
    High = 2,
}

impl From<RiskLevel> for FireRiskLevel {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => FireRiskLevel::Low,
            RiskLevel::Moderate => FireRiskLevel::Moderate,
            RiskLevel::High => FireRiskLevel::High,
        }
    }
}

/// Nearest-hazard result.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRiskAssessment {
    /// Index into the hazard array passed in
    pub index: usize,
    pub distance_km: f64,
    /// 0-100
    pub risk_score: u8,
    pub risk_level: FireRiskLevel,
}

impl From<&RiskAssessment> for FireRiskAssessment {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            index: assessment.index,
            distance_km: assessment.distance.value(),
            risk_score: assessment.score.value(),
            risk_level: assessment.level().into(),
        }
    }
}
