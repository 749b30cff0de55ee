use crate::core_types::{Coordinate, Kilometers};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates (haversine formula).
///
/// `h = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `d = 2·R·atan2(√h, √(1−h))`.
///
/// Symmetric in its arguments and zero for identical points.
pub fn great_circle_distance_km(a: Coordinate, b: Coordinate) -> Kilometers {
    let (lat1, lon1) = a.to_radians();
    let (lat2, lon2) = b.to_radians();

    let half_dlat = (*(lat2 - lat1) / 2.0).sin();
    let half_dlon = (*(lon2 - lon1) / 2.0).sin();

    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = (half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon)
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Kilometers::new(EARTH_RADIUS_KM * c)
}
