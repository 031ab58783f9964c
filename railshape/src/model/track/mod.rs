mod coordinate_key;
mod filter_report;
mod geo_point;
pub mod segment_filter;
mod segment_id;
pub mod segment_source;
mod track_error;
pub mod track_graph;
mod track_segment;
mod traversal_direction;

pub use coordinate_key::{CoordinateKey, DEFAULT_COORDINATE_PRECISION, MAX_COORDINATE_PRECISION};
pub use filter_report::{FilterReport, UNKNOWN_USAGE};
pub use geo_point::GeoPoint;
pub use segment_filter::SegmentFilter;
pub use segment_id::SegmentId;
pub use track_error::TrackError;
pub use track_graph::{GeometryStore, GraphBuildReport, TrackEdge, TrackGraph};
pub use track_segment::{SegmentTags, TrackSegment};
pub use traversal_direction::TraversalDirection;
