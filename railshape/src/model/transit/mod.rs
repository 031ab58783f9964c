mod route_spec;
mod shape;
pub mod shape_writer;
mod station;
mod transit_io_error;
pub mod trip_ops;

use std::collections::BTreeMap;

pub use route_spec::RouteSpec;
pub use shape::{Shape, ShapeDiagnostics, ShapePoint, ShapeRow};
pub use station::{Station, StationDirectory};
pub use transit_io_error::TransitIoError;

/// route id to the shape id generated for it.
pub type RouteShapeMapping = BTreeMap<String, String>;
