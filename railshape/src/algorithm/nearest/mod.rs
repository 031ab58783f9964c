mod linear_scan;
mod rtree_finder;

pub use linear_scan::LinearScanFinder;
pub use rtree_finder::RTreeFinder;

use crate::model::track::{CoordinateKey, GeoPoint, TrackError, TrackGraph};
use serde::{Deserialize, Serialize};

/// default search radius around a station when snapping it onto the graph.
pub const DEFAULT_MAX_SEARCH_RADIUS_KM: f64 = 10.0;

/// a graph node matched to a query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNode {
    pub key: CoordinateKey,
    /// haversine distance from the query position to the node
    pub distance_meters: f64,
}

/// finds the graph node closest to an arbitrary position by great-circle
/// distance. when several nodes are equally close, the smallest
/// [`CoordinateKey`] is returned.
pub trait NearestNodeFinder: Send + Sync {
    /// the closest node, or None if there are no nodes.
    fn nearest(&self, target: &GeoPoint) -> Option<NearestNode>;
}

/// selects the [`NearestNodeFinder`] implementation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearestNodeIndex {
    /// exhaustive scan over every node
    #[default]
    LinearScan,
    /// R-tree over unit-sphere coordinates
    Rtree,
}

impl NearestNodeIndex {
    pub fn build(&self, graph: &TrackGraph) -> Box<dyn NearestNodeFinder> {
        match self {
            NearestNodeIndex::LinearScan => Box::new(LinearScanFinder::new(graph)),
            NearestNodeIndex::Rtree => Box::new(RTreeFinder::new(graph)),
        }
    }
}

/// finds the closest node to `target`, failing when it lies further away
/// than `max_radius_meters`.
pub fn find_nearest_node(
    finder: &dyn NearestNodeFinder,
    target: &GeoPoint,
    max_radius_meters: f64,
) -> Result<NearestNode, TrackError> {
    match finder.nearest(target) {
        Some(nearest) if nearest.distance_meters <= max_radius_meters => Ok(nearest),
        other => Err(TrackError::NoNodeWithinRadius {
            lat: target.lat,
            lon: target.lon,
            radius_meters: max_radius_meters,
            nearest_meters: other.map(|n| n.distance_meters),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{find_nearest_node, NearestNodeFinder, NearestNodeIndex, DEFAULT_MAX_SEARCH_RADIUS_KM};
    use crate::model::track::{GeoPoint, TrackError, TrackGraph, TrackSegment};

    /// a short north-south line near Kenitra and a second one near Rabat
    fn test_graph() -> TrackGraph {
        let segments = vec![
            TrackSegment::new(
                1,
                vec![GeoPoint::new(34.2610, -6.5802), GeoPoint::new(34.2500, -6.5900)],
            ),
            TrackSegment::new(
                2,
                vec![GeoPoint::new(34.0150, -6.8330), GeoPoint::new(34.0050, -6.8400)],
            ),
        ];
        TrackGraph::build(segments, 4).unwrap()
    }

    #[test]
    fn test_exact_match_has_zero_distance() {
        let graph = test_graph();
        for index in [NearestNodeIndex::LinearScan, NearestNodeIndex::Rtree] {
            let finder = index.build(&graph);
            let target = GeoPoint::new(34.0150, -6.8330);
            let nearest =
                find_nearest_node(finder.as_ref(), &target, DEFAULT_MAX_SEARCH_RADIUS_KM * 1000.0)
                    .unwrap();
            assert_eq!(nearest.key, graph.key_for(&target));
            assert_eq!(nearest.distance_meters, 0.0);
        }
    }

    #[test]
    fn test_station_outside_radius() {
        let graph = test_graph();
        // ~50km south of the Rabat node
        let target = GeoPoint::new(33.5550, -6.8400);
        for index in [NearestNodeIndex::LinearScan, NearestNodeIndex::Rtree] {
            let finder = index.build(&graph);
            let result = find_nearest_node(finder.as_ref(), &target, 10_000.0);
            match result {
                Err(TrackError::NoNodeWithinRadius {
                    radius_meters,
                    nearest_meters: Some(d),
                    ..
                }) => {
                    assert_eq!(radius_meters, 10_000.0);
                    assert!((d - 50_000.0).abs() < 500.0, "unexpected distance {d}");
                }
                other => panic!("expected NoNodeWithinRadius, found {other:?}"),
            }
            let within = find_nearest_node(finder.as_ref(), &target, 60_000.0).unwrap();
            assert_eq!(within.key, graph.key_for(&GeoPoint::new(34.0050, -6.8400)));
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = TrackGraph::build(vec![], 4).unwrap();
        for index in [NearestNodeIndex::LinearScan, NearestNodeIndex::Rtree] {
            let finder = index.build(&graph);
            let result = find_nearest_node(finder.as_ref(), &GeoPoint::new(34.0, -6.8), 10_000.0);
            assert!(matches!(
                result,
                Err(TrackError::NoNodeWithinRadius {
                    nearest_meters: None,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_ties_resolve_to_smallest_key_for_every_index() {
        // two nodes mirrored around the query point along the equator
        let segments = vec![
            TrackSegment::new(1, vec![GeoPoint::new(0.0, 0.01), GeoPoint::new(1.0, 0.01)]),
            TrackSegment::new(2, vec![GeoPoint::new(0.0, -0.01), GeoPoint::new(1.0, -0.01)]),
        ];
        let graph = TrackGraph::build(segments, 4).unwrap();
        let expected = graph.key_for(&GeoPoint::new(0.0, -0.01));
        for index in [NearestNodeIndex::LinearScan, NearestNodeIndex::Rtree] {
            let finder = index.build(&graph);
            for _ in 0..10 {
                let nearest = finder.nearest(&GeoPoint::new(0.0, 0.0)).unwrap();
                assert_eq!(nearest.key, expected, "{index:?} broke the tie differently");
            }
        }
    }

    #[test]
    fn test_index_deserialization() {
        let index: NearestNodeIndex = serde_json::from_str(r#""rtree""#).unwrap();
        assert_eq!(index, NearestNodeIndex::Rtree);
        let index: NearestNodeIndex = serde_json::from_str(r#""linear_scan""#).unwrap();
        assert_eq!(index, NearestNodeIndex::LinearScan);
    }
}
