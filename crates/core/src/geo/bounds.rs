use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core_types::{Coordinate, CoordinateError};

/// Longitude/latitude rectangle, such as the visible map viewport.
///
/// Edges are inclusive. When `west > east` the box crosses the antimeridian
/// and covers `[west, 180] ∪ [-180, east]`. Deserialized bounds are
/// validated like [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct GeoBounds {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl GeoBounds {
    /// Bounds from the south-west and north-east corners.
    pub fn from_corners(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            west: south_west.longitude(),
            south: south_west.latitude().min(north_east.latitude()),
            east: north_east.longitude(),
            north: south_west.latitude().max(north_east.latitude()),
        }
    }

    /// Degenerate bounds covering a single point
    pub fn from_point(point: Coordinate) -> Self {
        Self::from_corners(point, point)
    }

    /// Smallest bounds (without antimeridian wrap) enclosing every coordinate.
    /// Returns `None` for an empty input.
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for c in iter {
            bounds.extend(c);
        }
        Some(bounds)
    }

    /// Grow the bounds to include `point`.
    ///
    /// Non-wrapping bounds grow by plain min/max and never start to wrap.
    /// Wrapping bounds keep wrapping and move whichever longitude edge is
    /// closer to the point.
    pub fn extend(&mut self, point: Coordinate) {
        let lon = point.longitude();
        self.south = self.south.min(point.latitude());
        self.north = self.north.max(point.latitude());

        if !self.crosses_antimeridian() {
            self.west = self.west.min(lon);
            self.east = self.east.max(lon);
        } else if lon < self.west && lon > self.east {
            let eastward = (lon - self.east).rem_euclid(360.0);
            let westward = (self.west - lon).rem_euclid(360.0);
            if eastward <= westward {
                self.east = lon;
            } else {
                self.west = lon;
            }
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        let lat = point.latitude();
        let lon = point.longitude();
        let in_lat = self.south <= lat && lat <= self.north;
        let in_lon = if self.crosses_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            self.west <= lon && lon <= self.east
        };
        in_lat && in_lon
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Midpoint of the box, honouring antimeridian wrap.
    pub fn center(&self) -> Coordinate {
        let lat = (self.south + self.north) / 2.0;
        let mut lon = if self.crosses_antimeridian() {
            (self.west + self.east + 360.0) / 2.0
        } else {
            (self.west + self.east) / 2.0
        };
        if lon > 180.0 {
            lon -= 360.0;
        }
        Coordinate::from_valid(lon, lat)
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn north(&self) -> f64 {
        self.north
    }
}

/// Unvalidated wire form of [`GeoBounds`]
#[derive(Deserialize)]
struct RawBounds {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl TryFrom<RawBounds> for GeoBounds {
    type Error = CoordinateError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Ok(Self::from_corners(
            Coordinate::new(raw.west, raw.south)?,
            Coordinate::new(raw.east, raw.north)?,
        ))
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.west, self.south, self.east, self.north
        )
    }
}

/// Parses `"west,south,east,north"`.
impl FromStr for GeoBounds {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| CoordinateError::Malformed(format!("bounds '{s}': {e}")))?;

        let [west, south, east, north] = parts[..] else {
            return Err(CoordinateError::Malformed(format!(
                "bounds '{s}': expected west,south,east,north"
            )));
        };

        GeoBounds::try_from(RawBounds {
            west,
            south,
            east,
            north,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).unwrap()
    }

    #[test]
    fn test_contains_inclusive_edges() {
        let bounds = GeoBounds::from_corners(coord(110.0, -45.0), coord(155.0, -10.0));
        assert!(bounds.contains(coord(133.0, -25.0)));
        assert!(bounds.contains(coord(110.0, -45.0)));
        assert!(bounds.contains(coord(155.0, -10.0)));
        assert!(!bounds.contains(coord(109.9, -25.0)));
        assert!(!bounds.contains(coord(133.0, -9.9)));
    }

    #[test]
    fn test_antimeridian_viewport() {
        let bounds = GeoBounds::from_corners(coord(170.0, -50.0), coord(-170.0, -30.0));
        assert!(bounds.crosses_antimeridian());
        assert!(bounds.contains(coord(175.0, -40.0)));
        assert!(bounds.contains(coord(-175.0, -40.0)));
        assert!(!bounds.contains(coord(0.0, -40.0)));

        let center = bounds.center();
        assert!((center.longitude().abs() - 180.0).abs() < 1e-9);
        assert!((center.latitude() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_coordinates() {
        assert!(GeoBounds::from_coordinates(Vec::new()).is_none());

        let bounds = GeoBounds::from_coordinates(vec![
            coord(-120.0, 35.0),
            coord(-118.0, 39.0),
            coord(-122.0, 37.0),
        ])
        .unwrap();
        assert_eq!(bounds.west(), -122.0);
        assert_eq!(bounds.east(), -118.0);
        assert_eq!(bounds.south(), 35.0);
        assert_eq!(bounds.north(), 39.0);
        assert_eq!(bounds.center(), coord(-120.0, 37.0));
    }

    #[test]
    fn test_extend_across_antimeridian() {
        let mut bounds = GeoBounds::from_corners(coord(170.0, -50.0), coord(-170.0, -30.0));

        // Already inside the wrapped longitude span
        bounds.extend(coord(179.0, -20.0));
        assert_eq!((bounds.west(), bounds.east()), (170.0, -170.0));
        assert_eq!(bounds.north(), -20.0);

        // Closer to the eastern edge
        bounds.extend(coord(-160.0, -40.0));
        assert_eq!((bounds.west(), bounds.east()), (170.0, -160.0));

        // Closer to the western edge
        bounds.extend(coord(150.0, -40.0));
        assert_eq!((bounds.west(), bounds.east()), (150.0, -160.0));
        assert!(bounds.crosses_antimeridian());
        assert!(bounds.contains(coord(-179.0, -40.0)));
        assert!(!bounds.contains(coord(0.0, -40.0)));
    }

    #[test]
    fn test_deserialize_validates() {
        let bounds: GeoBounds =
            serde_json::from_str(r#"{"west": -10, "south": 35, "east": 30, "north": 60}"#).unwrap();
        assert_eq!(bounds, "-10,35,30,60".parse().unwrap());
        assert_eq!(
            serde_json::from_str::<GeoBounds>(&serde_json::to_string(&bounds).unwrap()).unwrap(),
            bounds
        );

        assert!(serde_json::from_str::<GeoBounds>(
            r#"{"west": 500, "south": 0, "east": 10, "north": 10}"#
        )
        .is_err());
        assert!(serde_json::from_str::<GeoBounds>(
            r#"{"west": 0, "south": -95, "east": 10, "north": 10}"#
        )
        .is_err());
    }

    #[test]
    fn test_parse() {
        let bounds: GeoBounds = "-10, 35, 30, 60".parse().unwrap();
        assert_eq!(bounds.west(), -10.0);
        assert_eq!(bounds.north(), 60.0);
        assert_eq!(bounds.to_string(), "-10,35,30,60");

        assert!("1,2,3".parse::<GeoBounds>().is_err());
        assert!("a,b,c,d".parse::<GeoBounds>().is_err());
        assert!("-200,0,10,10".parse::<GeoBounds>().is_err());
    }
}
