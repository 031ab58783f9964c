use crate::model::track::TrackError;
use thiserror::Error;

/// why a single route produced no shape. these never stop the batch.
#[derive(Error, Debug)]
pub enum RouteShapeError {
    #[error("station '{station_id}' of route '{route_id}' is not in the station directory")]
    MissingStationData { route_id: String, station_id: String },
    #[error("station '{station_id}' could not be snapped onto the track network: {source}")]
    NodeNotFound {
        station_id: String,
        source: TrackError,
    },
    #[error("{source}")]
    NoPathFound { source: TrackError },
    #[error("failure assembling path geometry: {source}")]
    AssemblyFailed { source: TrackError },
}
