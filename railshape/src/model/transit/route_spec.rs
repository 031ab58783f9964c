use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a rail route between two terminal stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub route_id: String,
    pub name: String,
    /// origin and destination station ids
    pub terminals: (String, String),
}

impl RouteSpec {
    pub fn new(route_id: &str, name: &str, origin: &str, destination: &str) -> RouteSpec {
        RouteSpec {
            route_id: String::from(route_id),
            name: String::from(name),
            terminals: (String::from(origin), String::from(destination)),
        }
    }

    /// shapes are identified by the route they were generated for.
    pub fn shape_id(&self) -> &str {
        &self.route_id
    }
}

impl Display for RouteSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' ({} -> {})",
            self.route_id, self.name, self.terminals.0, self.terminals.1
        )
    }
}
