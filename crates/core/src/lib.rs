//! Fire Risk Core Library
//!
//! Geospatial proximity and risk scoring for wildfire hazard feeds.
//! Given an observer position and a collection of hazard records (satellite
//! heat anomalies annotated with local weather), the engine computes
//! great-circle distances, finds the nearest hazard and produces a 0-100
//! risk score from a fixed weighted model.
//!
//! ## Map-side helpers
//!
//! Around the engine sit the pieces a map front-end needs:
//! - Viewport filtering and batched marker placement
//! - Country search and the extent of search results
//! - Lenient parsing of the hazard JSON feed
//!
//! Every operation is pure and safe to call concurrently.

// Core types and utilities
pub mod core_types;

// Geometry on the sphere
pub mod geo;

// Risk model, scoring and classification
pub mod risk;

pub mod engine;
pub mod feed;
pub mod search;
pub mod viewport;

// Re-export core types
pub use core_types::{Coordinate, CoordinateError, HazardRecord, DEFAULT_OBSERVER};
pub use core_types::{Degrees, Kilometers, NegativeDistance, Radians};

// Re-export geometry
pub use geo::{great_circle_distance_km, GeoBounds, EARTH_RADIUS_KM};

// Re-export risk types
pub use risk::{
    classify_risk, risk_score, RiskInputs, RiskLevel, RiskScore, ScoreOutOfRange, SubScores,
};
pub use risk::{RiskModel, RiskModelError, RiskWeights};

// Re-export engine and helpers
pub use engine::{
    assess_all, filter_valid_hazards, find_nearest, rank_by_risk, GeoRiskEngine, RiskAssessment,
};
pub use feed::{load_hazard_feed, parse_hazard_feed, FeedError};
pub use search::{available_countries, filter_by_country, search_extent};
pub use viewport::{MarkerPlacement, MarkerPlan, MARKER_BATCH_SIZE};
