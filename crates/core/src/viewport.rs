//! Viewport-gated marker placement
//!
//! Only hazards inside the visible map area get markers, and markers are
//! handed out in fixed-size batches so a UI can yield between batches
//! instead of placing thousands of markers in one frame.

use serde::Serialize;

use crate::core_types::{Coordinate, HazardRecord};
use crate::engine::valid_hazards;
use crate::geo::GeoBounds;

/// Markers placed per batch
pub const MARKER_BATCH_SIZE: usize = 100;

/// Where to put one marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerPlacement {
    /// Index of the hazard in the source slice
    pub index: usize,
    pub coordinate: Coordinate,
}

/// Markers visible in a viewport, split into batches
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlan {
    placements: Vec<MarkerPlacement>,
    batch_size: usize,
}

impl MarkerPlan {
    /// Plan markers for every valid hazard inside `viewport`, in input order.
    /// A `batch_size` of zero is treated as one.
    pub fn new(hazards: &[HazardRecord], viewport: &GeoBounds, batch_size: usize) -> Self {
        let placements = valid_hazards(hazards)
            .filter(|(_, coordinate, _)| viewport.contains(*coordinate))
            .map(|(index, coordinate, _)| MarkerPlacement { index, coordinate })
            .collect();

        Self {
            placements,
            batch_size: batch_size.max(1),
        }
    }

    /// Plan with the default batch size
    pub fn with_default_batches(hazards: &[HazardRecord], viewport: &GeoBounds) -> Self {
        Self::new(hazards, viewport, MARKER_BATCH_SIZE)
    }

    pub fn visible_count(&self) -> usize {
        self.placements.len()
    }

    pub fn batch_count(&self) -> usize {
        self.placements.len().div_ceil(self.batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn placements(&self) -> &[MarkerPlacement] {
        &self.placements
    }

    pub fn batches(&self) -> impl Iterator<Item = &[MarkerPlacement]> {
        self.placements.chunks(self.batch_size)
    }
}
