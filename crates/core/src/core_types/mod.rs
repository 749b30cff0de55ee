//! Core types and utilities

pub mod coordinate;
pub mod hazard;
pub mod units;

pub use coordinate::{Coordinate, CoordinateError, DEFAULT_OBSERVER};
pub use hazard::HazardRecord;
pub use units::*;
