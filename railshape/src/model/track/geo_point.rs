use geo::{Distance, HaversineMeasure, Point};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// spherical earth of radius 6371 km used for every distance.
pub const EARTH: HaversineMeasure = HaversineMeasure::new(6_371_000.0);

/// a WGS84 position in degrees, as found in the `geometry` array of an
/// Overpass way element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    /// geo types are x/y, so longitude comes first.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// great-circle distance to another position in meters.
    pub fn haversine_meters(&self, other: &GeoPoint) -> f64 {
        EARTH.distance(self.to_point(), other.to_point())
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(value: Point<f64>) -> Self {
        GeoPoint::new(value.y(), value.x())
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
