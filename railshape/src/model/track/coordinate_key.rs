use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::GeoPoint;

/// number of decimal places used by default when rounding endpoint
/// coordinates into graph node keys. 4 decimals is roughly 11 meters.
pub const DEFAULT_COORDINATE_PRECISION: u32 = 4;

/// upper bound on the rounding precision. beyond 9 decimals the scaled
/// coordinates would no longer be exactly representable in an f64.
pub const MAX_COORDINATE_PRECISION: u32 = 9;

/// a latitude/longitude pair rounded to a fixed number of decimals, used as
/// the identity of a node in the track graph.
///
/// the rounded values are stored as scaled integers so that keys have exact
/// equality, hashing and a total (lexicographic lat, then lon) ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CoordinateKey {
    lat: i64,
    lon: i64,
    precision: u32,
}

impl CoordinateKey {
    /// rounds a coordinate to `precision` decimals, half away from zero.
    pub fn new(lat: f64, lon: f64, precision: u32) -> CoordinateKey {
        let scale = scale(precision);
        CoordinateKey {
            lat: (lat * scale).round() as i64,
            lon: (lon * scale).round() as i64,
            precision,
        }
    }

    pub fn from_point(point: &GeoPoint, precision: u32) -> CoordinateKey {
        CoordinateKey::new(point.lat, point.lon, precision)
    }

    pub fn lat(&self) -> f64 {
        self.lat as f64 / scale(self.precision)
    }

    pub fn lon(&self) -> f64 {
        self.lon as f64 / scale(self.precision)
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn to_geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.lat(), self.lon())
    }

    /// rounds the key's own position again at its precision.
    pub fn rounded(&self) -> CoordinateKey {
        CoordinateKey::new(self.lat(), self.lon(), self.precision)
    }
}

impl Display for CoordinateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.precision as usize;
        write!(f, "({:.p$}, {:.p$})", self.lat(), self.lon())
    }
}

fn scale(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}
