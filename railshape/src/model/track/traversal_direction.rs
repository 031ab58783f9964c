use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// orientation in which a segment's stored geometry is walked when
/// following a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalDirection {
    Forward,
    Reverse,
}

impl TraversalDirection {
    pub fn is_reversed(&self) -> bool {
        matches!(self, TraversalDirection::Reverse)
    }
}

impl Display for TraversalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalDirection::Forward => write!(f, "forward"),
            TraversalDirection::Reverse => write!(f, "reverse"),
        }
    }
}
