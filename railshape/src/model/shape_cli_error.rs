use super::track::TrackError;
use super::transit::TransitIoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure building track network: {source}")]
    TrackError {
        #[from]
        source: TrackError,
    },
    #[error("failure reading or writing GTFS data: {source}")]
    TransitIoError {
        #[from]
        source: TransitIoError,
    },
    #[error("failure encoding report: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("no route shape could be generated: {failed} routes failed, {degenerate} routes had both terminals on the same node")]
    NoShapesGenerated { failed: usize, degenerate: usize },
}
