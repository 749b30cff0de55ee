//! Nearest-hazard search and per-hazard risk assessment
//!
//! The engine is a small `Copy` value holding a validated [`RiskModel`]. It
//! keeps no state between calls: every operation is a pure function of its
//! inputs, so callers may re-run it whenever the observer moves or the feed
//! refreshes.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core_types::{Coordinate, HazardRecord, Kilometers};
use crate::geo::great_circle_distance_km;
use crate::risk::{RiskInputs, RiskLevel, RiskModel, RiskModelError, RiskScore};

/// A hazard paired with its distance from the observer and its risk score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Position of the hazard in the input sequence
    pub index: usize,
    pub hazard: HazardRecord,
    /// Validated hazard location
    pub coordinate: Coordinate,
    pub distance: Kilometers,
    pub score: RiskScore,
}

impl RiskAssessment {
    pub fn level(&self) -> RiskLevel {
        self.score.level()
    }
}

/// Stateless risk engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoRiskEngine {
    model: RiskModel,
}

impl GeoRiskEngine {
    /// Engine with the default model
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom model.
    ///
    /// # Errors
    /// Returns error if the model fails [`RiskModel::validate`].
    pub fn with_model(model: RiskModel) -> Result<Self, RiskModelError> {
        model.validate()?;
        Ok(Self { model })
    }

    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    pub fn risk_score(&self, inputs: &RiskInputs) -> RiskScore {
        self.model.score(inputs)
    }

    /// Find the hazard closest to `observer`.
    ///
    /// Invalid records are skipped. Returns `None` when no valid record
    /// remains. On equal distances the earliest record wins.
    pub fn find_nearest(
        &self,
        observer: Coordinate,
        hazards: &[HazardRecord],
    ) -> Option<RiskAssessment> {
        let mut nearest: Option<(usize, Coordinate, &HazardRecord, Kilometers)> = None;
        let mut scanned = 0usize;

        for (index, coordinate, hazard) in valid_hazards(hazards) {
            scanned += 1;
            let distance = great_circle_distance_km(observer, coordinate);
            let closer = match nearest {
                Some((_, _, _, best)) => distance < best,
                None => true,
            };
            if closer {
                nearest = Some((index, coordinate, hazard, distance));
            }
        }

        debug!(
            total = hazards.len(),
            valid = scanned,
            "Nearest hazard scan complete"
        );

        nearest.map(|(index, coordinate, hazard, distance)| {
            self.assessment(index, hazard, coordinate, distance)
        })
    }

    /// Assess every valid hazard, preserving input order.
    pub fn assess_all(&self, observer: Coordinate, hazards: &[HazardRecord]) -> Vec<RiskAssessment> {
        let valid: Vec<_> = valid_hazards(hazards).collect();

        valid
            .par_iter()
            .map(|&(index, coordinate, hazard)| {
                let distance = great_circle_distance_km(observer, coordinate);
                self.assessment(index, hazard, coordinate, distance)
            })
            .collect()
    }

    fn assessment(
        &self,
        index: usize,
        hazard: &HazardRecord,
        coordinate: Coordinate,
        distance: Kilometers,
    ) -> RiskAssessment {
        RiskAssessment {
            index,
            hazard: hazard.clone(),
            coordinate,
            distance,
            score: self.risk_score(&RiskInputs::for_hazard(hazard, distance)),
        }
    }
}

/// Valid records with their input index and validated location.
/// Each rejected record is reported once through `tracing`.
pub(crate) fn valid_hazards<'a>(
    records: &'a [HazardRecord],
) -> impl Iterator<Item = (usize, Coordinate, &'a HazardRecord)> + 'a {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.coordinate() {
            Ok(coordinate) => Some((index, coordinate, record)),
            Err(e) => {
                warn!(index, location = %record.location, "Invalid coordinates: {e}");
                None
            }
        })
}

/// Keep only records with a valid location, in input order.
pub fn filter_valid_hazards(records: &[HazardRecord]) -> Vec<HazardRecord> {
    valid_hazards(records)
        .map(|(_, _, record)| record.clone())
        .collect()
}

/// [`GeoRiskEngine::find_nearest`] with the default model
pub fn find_nearest(observer: Coordinate, hazards: &[HazardRecord]) -> Option<RiskAssessment> {
    GeoRiskEngine::new().find_nearest(observer, hazards)
}

/// [`GeoRiskEngine::assess_all`] with the default model
pub fn assess_all(observer: Coordinate, hazards: &[HazardRecord]) -> Vec<RiskAssessment> {
    GeoRiskEngine::new().assess_all(observer, hazards)
}

/// Sort by score, highest first. Stable: equal scores keep their order.
pub fn rank_by_risk(assessments: &mut [RiskAssessment]) {
    assessments.sort_by(|a, b| b.score.cmp(&a.score));
}
