use super::search::PathStep;
use crate::model::track::{GeoPoint, GeometryStore, TrackError};
use serde::{Deserialize, Serialize};

/// a point along an assembled path with the distance travelled to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredPoint {
    pub point: GeoPoint,
    pub distance_meters: f64,
}

/// the continuous polyline of a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssembledPath {
    pub points: Vec<MeasuredPoint>,
    /// shared junction points dropped between consecutive segments
    pub junctions_removed: usize,
    pub segments: usize,
}

impl AssembledPath {
    pub fn total_distance_meters(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.distance_meters)
            .unwrap_or_default()
    }
}

/// concatenates the stored geometry of each path step into one polyline.
///
/// reversed steps walk their geometry backwards. when a segment begins at
/// exactly the point the previous one ended on, that point is emitted once.
/// distances are cumulative haversine meters, starting at 0.
pub fn assemble_path(path: &[PathStep], store: &GeometryStore) -> Result<AssembledPath, TrackError> {
    let mut points: Vec<GeoPoint> = vec![];
    let mut junctions_removed = 0;

    for step in path {
        let geometry = store
            .get(&step.segment_id)
            .ok_or(TrackError::MissingSegmentGeometry(step.segment_id))?;
        let mut oriented = geometry.iter().copied().collect::<Vec<_>>();
        if step.direction.is_reversed() {
            oriented.reverse();
        }
        let mut oriented = oriented.into_iter().peekable();
        if let (Some(last), Some(first)) = (points.last(), oriented.peek()) {
            if last == first {
                oriented.next();
                junctions_removed += 1;
            }
        }
        points.extend(oriented);
    }

    let mut measured = Vec::with_capacity(points.len());
    let mut distance_meters = 0.0;
    for (idx, point) in points.iter().enumerate() {
        if idx > 0 {
            distance_meters += points[idx - 1].haversine_meters(point);
        }
        measured.push(MeasuredPoint {
            point: *point,
            distance_meters,
        });
    }

    Ok(AssembledPath {
        points: measured,
        junctions_removed,
        segments: path.len(),
    })
}
