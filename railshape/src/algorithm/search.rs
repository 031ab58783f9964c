use crate::model::track::{CoordinateKey, SegmentId, TrackError, TrackGraph, TraversalDirection};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Display;

/// default bound on the number of segments in a path.
pub const DEFAULT_MAX_HOPS: usize = 500;

/// one traversed segment of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub segment_id: SegmentId,
    pub direction: TraversalDirection,
}

impl PathStep {
    pub fn new(segment_id: SegmentId, direction: TraversalDirection) -> PathStep {
        PathStep {
            segment_id,
            direction,
        }
    }
}

impl Display for PathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.segment_id, self.direction)
    }
}

/// finds a path between two graph nodes with the fewest segments using a
/// breadth-first search.
///
/// the path minimizes hop count, not distance: a single long segment wins
/// over several short ones between the same nodes.
///
/// # Arguments
///
/// * `graph` - graph to search
/// * `src` - origin node
/// * `dst` - destination node
/// * `max_hops` - nodes reached with this many segments are not expanded further
///
/// # Returns
///
/// The traversed segments in order, empty when `src == dst`, or
/// [`TrackError::NoPathFound`] when `dst` is unreachable within `max_hops`.
pub fn bfs_shortest_path(
    graph: &TrackGraph,
    src: CoordinateKey,
    dst: CoordinateKey,
    max_hops: usize,
) -> Result<Vec<PathStep>, TrackError> {
    if src == dst {
        return Ok(vec![]);
    }

    // nodes are marked visited when first discovered. each discovered node
    // remembers the node and step it was reached from.
    let mut visited: HashSet<CoordinateKey> = HashSet::from([src]);
    let mut predecessors: HashMap<CoordinateKey, (CoordinateKey, PathStep)> = HashMap::new();
    let mut frontier: VecDeque<(CoordinateKey, usize)> = VecDeque::from([(src, 0)]);

    while let Some((current, depth)) = frontier.pop_front() {
        if depth >= max_hops {
            continue;
        }
        // edges are stored in segment insertion order, so expansion order
        // does not depend on hash map iteration.
        for edge in graph.out_edges(&current) {
            if visited.contains(&edge.neighbor) {
                continue;
            }
            let step = PathStep::new(edge.segment_id, edge.direction);
            predecessors.insert(edge.neighbor, (current, step));
            if edge.neighbor == dst {
                return reconstruct_path(&predecessors, src, dst);
            }
            visited.insert(edge.neighbor);
            frontier.push_back((edge.neighbor, depth + 1));
        }
    }

    Err(TrackError::NoPathFound { src, dst, max_hops })
}

/// walks the predecessor links back from `dst` to `src`.
fn reconstruct_path(
    predecessors: &HashMap<CoordinateKey, (CoordinateKey, PathStep)>,
    src: CoordinateKey,
    dst: CoordinateKey,
) -> Result<Vec<PathStep>, TrackError> {
    let mut steps = vec![];
    let mut node = dst;
    while node != src {
        let (previous, step) = predecessors.get(&node).ok_or_else(|| {
            TrackError::InternalError(format!(
                "search tree is missing the predecessor of node {node} on the way to {dst}"
            ))
        })?;
        steps.push(*step);
        node = *previous;
    }
    steps.reverse();
    Ok(steps)
}
