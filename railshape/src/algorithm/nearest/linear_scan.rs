use super::{NearestNode, NearestNodeFinder};
use crate::model::track::{CoordinateKey, GeoPoint, TrackGraph};

/// exhaustive nearest-node search, computing the haversine distance to
/// every node. keys are held in sorted order so that a strict comparison
/// resolves ties to the lexicographically smallest key.
pub struct LinearScanFinder {
    keys: Vec<CoordinateKey>,
}

impl LinearScanFinder {
    pub fn new(graph: &TrackGraph) -> LinearScanFinder {
        let mut keys = graph.nodes().copied().collect::<Vec<_>>();
        keys.sort();
        LinearScanFinder { keys }
    }
}

impl NearestNodeFinder for LinearScanFinder {
    fn nearest(&self, target: &GeoPoint) -> Option<NearestNode> {
        let mut best: Option<NearestNode> = None;
        for key in self.keys.iter() {
            let distance_meters = target.haversine_meters(&key.to_geo_point());
            match best {
                Some(b) if distance_meters >= b.distance_meters => {}
                _ => {
                    best = Some(NearestNode {
                        key: *key,
                        distance_meters,
                    })
                }
            }
        }
        best
    }
}
