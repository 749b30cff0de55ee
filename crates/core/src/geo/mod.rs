//! Geometry on the sphere

pub mod bounds;
pub mod distance;

pub use bounds::GeoBounds;
pub use distance::{great_circle_distance_km, EARTH_RADIUS_KM};
