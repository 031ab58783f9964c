use thiserror::Error;

use super::{CoordinateKey, SegmentId};

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("failure reading track segments from {0}: {1}")]
    SegmentSourceError(String, String),
    #[error("coordinate precision {0} is not supported, must be at most {1} decimals")]
    InvalidPrecision(u32, u32),
    #[error("no graph node within {radius_meters:.0}m of ({lat:.6}, {lon:.6}), nearest is {}", nearest_description(.nearest_meters))]
    NoNodeWithinRadius {
        lat: f64,
        lon: f64,
        radius_meters: f64,
        nearest_meters: Option<f64>,
    },
    #[error("no path with at most {max_hops} segments found from node {src} to node {dst}")]
    NoPathFound {
        src: CoordinateKey,
        dst: CoordinateKey,
        max_hops: usize,
    },
    #[error("segment '{0}' is part of the path but has no stored geometry")]
    MissingSegmentGeometry(SegmentId),
    #[error("{0}")]
    InternalError(String),
}

fn nearest_description(nearest_meters: &Option<f64>) -> String {
    match nearest_meters {
        Some(d) => format!("{:.2}km away", d / 1000.0),
        None => String::from("<none, graph is empty>"),
    }
}
