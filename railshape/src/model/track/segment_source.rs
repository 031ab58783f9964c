use super::{TrackError, TrackSegment};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

/// an Overpass API response is either stored as returned, with the ways
/// under `elements`, or already unwrapped into a bare array of ways.
#[derive(Deserialize)]
#[serde(untagged)]
enum OverpassDocument {
    Elements(Vec<TrackSegment>),
    Response { elements: Vec<TrackSegment> },
}

/// reads railway ways with inline geometry (Overpass `out geom;`) from a
/// JSON file.
pub fn read_segments(filepath: &Path) -> Result<Vec<TrackSegment>, TrackError> {
    let filename = filepath.to_string_lossy().to_string();
    let file = File::open(filepath)
        .map_err(|e| TrackError::SegmentSourceError(filename.clone(), e.to_string()))?;
    let document: OverpassDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TrackError::SegmentSourceError(filename.clone(), e.to_string()))?;
    let segments = match document {
        OverpassDocument::Elements(elements) => elements,
        OverpassDocument::Response { elements } => elements,
    };
    log::info!("loaded {} OSM way elements from {}", segments.len(), filename);
    Ok(segments)
}
