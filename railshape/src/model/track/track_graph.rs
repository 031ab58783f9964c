use super::{
    CoordinateKey, GeoPoint, SegmentId, TrackError, TrackSegment, TraversalDirection as Dir,
    MAX_COORDINATE_PRECISION,
};
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::collections::{hash_map::Entry, HashMap};

/// a directed graph edge: following `segment_id` from the owning node leads to
/// `neighbor`, walking the segment's stored geometry in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEdge {
    pub neighbor: CoordinateKey,
    pub segment_id: SegmentId,
    pub direction: Dir,
}

/// original point lists of the linked segments, in stored orientation.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStore(HashMap<SegmentId, Vec<GeoPoint>>);

impl GeometryStore {
    pub fn get(&self, segment_id: &SegmentId) -> Option<&[GeoPoint]> {
        self.0.get(segment_id).map(|g| g.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// counts collected while building a [`TrackGraph`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphBuildReport {
    pub nodes: usize,
    pub segments_linked: usize,
    /// segments with fewer than two points, silently left out of the graph
    pub malformed_segments: usize,
    /// segments whose id was already linked, left out of the graph
    pub duplicate_segments: usize,
}

/// undirected connectivity of the track network. nodes are segment
/// endpoints rounded to a [`CoordinateKey`], and each segment is stored as a
/// pair of opposing directed edges.
///
/// connectivity is decided purely by key equality: two segments whose true
/// endpoints round to different keys are not linked, even if they touch.
/// the graph is read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackGraph {
    precision: u32,
    /// outgoing edges per node, in segment insertion order
    adjacency: HashMap<CoordinateKey, Vec<TrackEdge>>,
    geometries: GeometryStore,
    report: GraphBuildReport,
}

impl TrackGraph {
    /// builds the graph from filtered segments, rounding endpoints to
    /// `precision` decimals.
    pub fn build(segments: Vec<TrackSegment>, precision: u32) -> Result<TrackGraph, TrackError> {
        if precision > MAX_COORDINATE_PRECISION {
            return Err(TrackError::InvalidPrecision(
                precision,
                MAX_COORDINATE_PRECISION,
            ));
        }
        let mut adjacency: HashMap<CoordinateKey, Vec<TrackEdge>> = HashMap::new();
        let mut geometries: HashMap<SegmentId, Vec<GeoPoint>> = HashMap::new();
        let mut report = GraphBuildReport::default();

        let total = segments.len();
        let iter = tqdm!(segments.into_iter(), total = total, desc = "build track graph");
        for segment in iter {
            let (start, end) = match segment.endpoints() {
                Some((first, last)) => (
                    CoordinateKey::from_point(first, precision),
                    CoordinateKey::from_point(last, precision),
                ),
                None => {
                    log::debug!("skipping malformed {segment}");
                    report.malformed_segments += 1;
                    continue;
                }
            };
            let geometry_entry = match geometries.entry(segment.id) {
                Entry::Occupied(_) => {
                    log::warn!("segment id '{}' appears more than once, skipping", segment.id);
                    report.duplicate_segments += 1;
                    continue;
                }
                Entry::Vacant(entry) => entry,
            };
            geometry_entry.insert(segment.geometry);
            adjacency.entry(start).or_default().push(TrackEdge {
                neighbor: end,
                segment_id: segment.id,
                direction: Dir::Forward,
            });
            adjacency.entry(end).or_default().push(TrackEdge {
                neighbor: start,
                segment_id: segment.id,
                direction: Dir::Reverse,
            });
            report.segments_linked += 1;
        }
        eprintln!();
        report.nodes = adjacency.len();

        log::info!(
            "built track graph with {} nodes and {} segments ({} malformed, {} duplicate)",
            report.nodes,
            report.segments_linked,
            report.malformed_segments,
            report.duplicate_segments
        );

        Ok(TrackGraph {
            precision,
            adjacency,
            geometries: GeometryStore(geometries),
            report,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn report(&self) -> &GraphBuildReport {
        &self.report
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn n_segments(&self) -> usize {
        self.geometries.len()
    }

    pub fn n_edges(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    pub fn contains_node(&self, key: &CoordinateKey) -> bool {
        self.adjacency.contains_key(key)
    }

    /// node keys in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &CoordinateKey> {
        self.adjacency.keys()
    }

    /// outgoing edges of a node in insertion order, empty if the node is unknown.
    pub fn out_edges(&self, key: &CoordinateKey) -> &[TrackEdge] {
        self.adjacency
            .get(key)
            .map(|edges| edges.as_slice())
            .unwrap_or_default()
    }

    pub fn geometry_store(&self) -> &GeometryStore {
        &self.geometries
    }

    /// the node key a raw coordinate would round to in this graph.
    pub fn key_for(&self, point: &GeoPoint) -> CoordinateKey {
        CoordinateKey::from_point(point, self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::TrackGraph;
    use crate::model::track::{
        GeoPoint, SegmentId, TrackError, TrackSegment, TraversalDirection as Dir,
    };

    fn segment(id: i64, points: &[(f64, f64)]) -> TrackSegment {
        TrackSegment::new(
            id,
            points.iter().map(|(lat, lon)| GeoPoint::new(*lat, *lon)).collect(),
        )
    }

    #[test]
    fn test_each_segment_yields_two_opposing_edges() {
        let segments = vec![
            segment(10, &[(34.0, -6.8), (34.005, -6.795), (34.01, -6.79)]),
            segment(11, &[(34.01, -6.79), (34.02, -6.78)]),
            segment(12, &[(34.01, -6.79), (34.0, -6.77)]),
        ];
        let graph = TrackGraph::build(segments.clone(), 4).unwrap();
        assert_eq!(graph.n_segments(), 3);
        assert_eq!(graph.n_edges(), 6);
        assert_eq!(graph.n_nodes(), 4);

        for s in segments.iter() {
            let (first, last) = s.endpoints().unwrap();
            let start = graph.key_for(first);
            let end = graph.key_for(last);
            let all_edges = graph
                .nodes()
                .flat_map(|n| graph.out_edges(n).iter().map(move |e| (*n, *e)))
                .filter(|(_, e)| e.segment_id == s.id)
                .collect::<Vec<_>>();
            assert_eq!(all_edges.len(), 2, "segment {} should have 2 edges", s.id);
            let forward = all_edges
                .iter()
                .find(|(_, e)| e.direction == Dir::Forward)
                .unwrap();
            let reverse = all_edges
                .iter()
                .find(|(_, e)| e.direction == Dir::Reverse)
                .unwrap();
            assert_eq!((forward.0, forward.1.neighbor), (start, end));
            assert_eq!((reverse.0, reverse.1.neighbor), (end, start));
        }
    }

    #[test]
    fn test_malformed_and_duplicate_segments_are_excluded() {
        let segments = vec![
            segment(1, &[(34.0, -6.8), (34.01, -6.79)]),
            segment(2, &[(34.0, -6.8)]),
            segment(3, &[]),
            segment(1, &[(35.0, -6.8), (35.01, -6.79)]),
        ];
        let graph = TrackGraph::build(segments, 4).unwrap();
        let report = graph.report();
        assert_eq!(report.segments_linked, 1);
        assert_eq!(report.malformed_segments, 2);
        assert_eq!(report.duplicate_segments, 1);
        assert_eq!(report.nodes, 2);
        assert_eq!(graph.n_edges(), 2);
        // the first occurrence of the id keeps its geometry
        let stored = graph.geometry_store().get(&SegmentId(1)).unwrap();
        assert_eq!(stored[0], GeoPoint::new(34.0, -6.8));
    }

    #[test]
    fn test_geometry_store_keeps_original_orientation() {
        let points = [(34.0, -6.8), (34.003, -6.797), (34.01, -6.79)];
        let graph = TrackGraph::build(vec![segment(5, &points)], 4).unwrap();
        let stored = graph.geometry_store().get(&SegmentId(5)).unwrap();
        let expected = points
            .iter()
            .map(|(lat, lon)| GeoPoint::new(*lat, *lon))
            .collect::<Vec<_>>();
        assert_eq!(stored, expected.as_slice());
        assert!(graph.geometry_store().get(&SegmentId(6)).is_none());
    }

    #[test]
    fn test_rounding_links_nearby_endpoints() {
        // the endpoints of the two segments differ by ~3m
        let segments = vec![
            segment(1, &[(34.0, -6.8), (34.01001, -6.79001)]),
            segment(2, &[(34.01003, -6.79003), (34.02, -6.78)]),
        ];
        let graph = TrackGraph::build(segments.clone(), 4).unwrap();
        assert_eq!(graph.n_nodes(), 3);
        let fine = TrackGraph::build(segments, 6).unwrap();
        assert_eq!(fine.n_nodes(), 4);
    }

    #[test]
    fn test_invalid_precision() {
        let result = TrackGraph::build(vec![], 12);
        assert!(matches!(result, Err(TrackError::InvalidPrecision(12, _))));
    }

    #[test]
    fn test_unknown_node_has_no_edges() {
        let graph = TrackGraph::build(vec![segment(1, &[(34.0, -6.8), (34.01, -6.79)])], 4)
            .unwrap();
        let unknown = graph.key_for(&GeoPoint::new(0.0, 0.0));
        assert!(!graph.contains_node(&unknown));
        assert!(graph.out_edges(&unknown).is_empty());
    }
}
