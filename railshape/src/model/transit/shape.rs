use crate::algorithm::AssembledPath;
use geo::LineString;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// a GTFS shape point. sequence starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub lat: f64,
    pub lon: f64,
    pub sequence: usize,
    pub dist_traveled_meters: f64,
}

/// how a shape was derived, for quality checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeDiagnostics {
    /// distance from the origin station to the node it snapped onto
    pub origin_snap_meters: f64,
    /// distance from the destination station to the node it snapped onto
    pub destination_snap_meters: f64,
    pub segments: usize,
    pub junctions_removed: usize,
    pub points: usize,
    pub total_km: f64,
}

/// the generated geometry of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub shape_id: String,
    pub route_id: String,
    pub points: Vec<ShapePoint>,
    pub diagnostics: ShapeDiagnostics,
}

impl Shape {
    pub fn new(
        shape_id: &str,
        route_id: &str,
        path: &AssembledPath,
        origin_snap_meters: f64,
        destination_snap_meters: f64,
    ) -> Shape {
        let points = path
            .points
            .iter()
            .enumerate()
            .map(|(idx, p)| ShapePoint {
                lat: p.point.lat,
                lon: p.point.lon,
                sequence: idx + 1,
                dist_traveled_meters: p.distance_meters,
            })
            .collect::<Vec<_>>();
        let diagnostics = ShapeDiagnostics {
            origin_snap_meters,
            destination_snap_meters,
            segments: path.segments,
            junctions_removed: path.junctions_removed,
            points: points.len(),
            total_km: path.total_distance_meters() / 1000.0,
        };
        Shape {
            shape_id: String::from(shape_id),
            route_id: String::from(route_id),
            points,
            diagnostics,
        }
    }

    /// the shape as a linestring in (lon, lat) order.
    pub fn to_linestring(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|p| (p.lon, p.lat))
            .collect::<Vec<_>>()
            .into()
    }

    /// rows of the GTFS shapes.txt file for this shape.
    pub fn rows(&self) -> impl Iterator<Item = ShapeRow<'_>> {
        self.points.iter().map(|p| ShapeRow {
            shape_id: &self.shape_id,
            shape_pt_lat: p.lat,
            shape_pt_lon: p.lon,
            shape_pt_sequence: p.sequence,
            shape_dist_traveled: p.dist_traveled_meters,
        })
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.diagnostics;
        write!(
            f,
            "shape {}: {} points over {} segments, {:.1}km, snapped {:.0}m/{:.0}m",
            self.shape_id,
            d.points,
            d.segments,
            d.total_km,
            d.origin_snap_meters,
            d.destination_snap_meters
        )
    }
}

/// a GTFS shapes.txt row.
#[derive(Debug, Serialize)]
pub struct ShapeRow<'a> {
    pub shape_id: &'a str,
    #[serde(serialize_with = "six_decimals")]
    pub shape_pt_lat: f64,
    #[serde(serialize_with = "six_decimals")]
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: usize,
    #[serde(serialize_with = "one_decimal")]
    pub shape_dist_traveled: f64,
}

fn six_decimals<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{value:.6}"))
}

fn one_decimal<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{value:.1}"))
}
