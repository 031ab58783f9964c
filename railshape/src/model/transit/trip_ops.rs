use super::shape_writer::{create_writer, ensure_directory, filenames};
use super::{RouteShapeMapping, TransitIoError};
use csv::{QuoteStyle, StringRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// counts collected while annotating trips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripAnnotationReport {
    pub trips: usize,
    pub trips_with_shape: usize,
    /// true if trips.txt had no shape_id column before annotation
    pub added_shape_column: bool,
}

/// copies a GTFS trips.txt into `output_directory`, setting each trip's
/// shape_id from its route. trips of routes without a shape get an empty
/// shape_id. the column is appended if absent, all other columns are kept
/// as they are.
///
/// returns None if the output exists and `overwrite` is false.
pub fn annotate_trips(
    trips_file: &Path,
    mapping: &RouteShapeMapping,
    output_directory: &Path,
    overwrite: bool,
) -> Result<Option<TripAnnotationReport>, TransitIoError> {
    let filename = trips_file.to_string_lossy().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .from_path(trips_file)
        .map_err(|e| TransitIoError::CsvReadError(filename.clone(), e))?;
    let mut headers = reader
        .headers()
        .map_err(|e| TransitIoError::CsvReadError(filename.clone(), e))?
        .clone();
    let route_idx = headers
        .iter()
        .position(|h| h == "route_id")
        .ok_or_else(|| TransitIoError::MissingColumn(filename.clone(), String::from("route_id")))?;
    let shape_idx = headers.iter().position(|h| h == "shape_id");
    let added_shape_column = shape_idx.is_none();
    if added_shape_column {
        headers.push_field("shape_id");
    }

    // read everything before writing, the output may replace the input
    let records = reader
        .records()
        .map(|r| r.map_err(|e| TransitIoError::CsvReadError(filename.clone(), e)))
        .collect::<Result<Vec<StringRecord>, TransitIoError>>()?;

    ensure_directory(output_directory)?;
    let mut writer = match create_writer(
        output_directory,
        filenames::TRIPS,
        false,
        QuoteStyle::Necessary,
        overwrite,
    )? {
        Some(writer) => writer,
        None => {
            log::warn!("{} exists and overwrite is disabled, skipping", filenames::TRIPS);
            return Ok(None);
        }
    };
    let write_err = |e| TransitIoError::CsvWriteError(String::from(filenames::TRIPS), e);
    writer.write_record(&headers).map_err(write_err)?;

    let mut report = TripAnnotationReport {
        added_shape_column,
        ..Default::default()
    };
    for record in records.iter() {
        let route_id = record.get(route_idx).unwrap_or_default();
        let shape_id = mapping.get(route_id).map(|s| s.as_str()).unwrap_or_default();
        let annotated: StringRecord = match shape_idx {
            Some(idx) => record
                .iter()
                .enumerate()
                .map(|(i, field)| if i == idx { shape_id } else { field })
                .collect(),
            None => record.iter().chain(std::iter::once(shape_id)).collect(),
        };
        writer.write_record(&annotated).map_err(write_err)?;
        report.trips += 1;
        if !shape_id.is_empty() {
            report.trips_with_shape += 1;
        }
    }
    writer
        .flush()
        .map_err(|e| TransitIoError::IoError(String::from(filenames::TRIPS), e))?;

    log::info!(
        "annotated {} trips, {} with a shape_id",
        report.trips,
        report.trips_with_shape
    );
    Ok(Some(report))
}
