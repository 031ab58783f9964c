use super::{NearestNode, NearestNodeFinder};
use crate::model::track::{CoordinateKey, GeoPoint, TrackGraph};
use rstar::{primitives::GeomWithData, RTree};

pub type NodeOnSphere = GeomWithData<[f64; 3], CoordinateKey>;

/// nearest-node search backed by an R-tree.
///
/// nodes are indexed as unit vectors on the sphere. the straight-line
/// (chord) distance between two unit vectors grows monotonically with their
/// great-circle distance, so the euclidean nearest neighbor is also the
/// haversine nearest neighbor, with no distortion near the poles or the
/// antimeridian.
pub struct RTreeFinder {
    tree: RTree<NodeOnSphere>,
}

impl RTreeFinder {
    pub fn new(graph: &TrackGraph) -> RTreeFinder {
        let nodes = graph
            .nodes()
            .map(|key| GeomWithData::new(unit_vector(&key.to_geo_point()), *key))
            .collect::<Vec<_>>();
        RTreeFinder {
            tree: RTree::bulk_load(nodes),
        }
    }
}

impl NearestNodeFinder for RTreeFinder {
    fn nearest(&self, target: &GeoPoint) -> Option<NearestNode> {
        let query = unit_vector(target);
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best_distance_2) = candidates.next()?;
        // equally distant nodes follow the first one in the iterator
        let key = candidates
            .take_while(|(_, distance_2)| *distance_2 <= best_distance_2)
            .map(|(node, _)| node.data)
            .fold(first.data, |best, key| best.min(key));
        Some(NearestNode {
            key,
            distance_meters: target.haversine_meters(&key.to_geo_point()),
        })
    }
}

/// position on the unit sphere for a WGS84 coordinate.
fn unit_vector(point: &GeoPoint) -> [f64; 3] {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}
