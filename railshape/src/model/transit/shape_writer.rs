use super::{Shape, TransitIoError};
use csv::QuoteStyle;
use kdam::tqdm;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use wkt::ToWkt;

pub mod filenames {
    pub const SHAPES: &str = "shapes.txt";
    pub const TRIPS: &str = "trips.txt";
    pub const SHAPES_WKT: &str = "shapes-wkt.csv";
}

#[derive(Serialize)]
struct WktRow<'a> {
    shape_id: &'a str,
    route_id: &'a str,
    points: usize,
    total_km: f64,
    geometry: String,
}

/// writes all shape points into a GTFS shapes.txt file in `output_directory`.
/// returns the written file, or None if it exists and `overwrite` is false.
pub fn write_shapes_txt(
    shapes: &[Shape],
    output_directory: &Path,
    overwrite: bool,
) -> Result<Option<PathBuf>, TransitIoError> {
    ensure_directory(output_directory)?;
    let mut writer = match create_writer(
        output_directory,
        filenames::SHAPES,
        true,
        QuoteStyle::Necessary,
        overwrite,
    )? {
        Some(writer) => writer,
        None => {
            log::warn!("{} exists and overwrite is disabled, skipping", filenames::SHAPES);
            return Ok(None);
        }
    };

    let iter = tqdm!(shapes.iter(), total = shapes.len(), desc = "write shapes");
    let mut n_rows = 0;
    for shape in iter {
        for row in shape.rows() {
            writer.serialize(row).map_err(|e| {
                TransitIoError::CsvWriteError(String::from(filenames::SHAPES), e)
            })?;
            n_rows += 1;
        }
    }
    eprintln!();
    writer
        .flush()
        .map_err(|e| TransitIoError::IoError(String::from(filenames::SHAPES), e))?;

    log::info!("wrote {} shape points for {} shapes", n_rows, shapes.len());
    Ok(Some(output_directory.join(filenames::SHAPES)))
}

/// writes one WKT LINESTRING per shape, in (lon, lat) order.
pub fn write_shapes_wkt(
    shapes: &[Shape],
    output_directory: &Path,
    overwrite: bool,
) -> Result<Option<PathBuf>, TransitIoError> {
    ensure_directory(output_directory)?;
    let mut writer = match create_writer(
        output_directory,
        filenames::SHAPES_WKT,
        true,
        QuoteStyle::Necessary,
        overwrite,
    )? {
        Some(writer) => writer,
        None => {
            log::warn!(
                "{} exists and overwrite is disabled, skipping",
                filenames::SHAPES_WKT
            );
            return Ok(None);
        }
    };
    for shape in shapes {
        let row = WktRow {
            shape_id: &shape.shape_id,
            route_id: &shape.route_id,
            points: shape.diagnostics.points,
            total_km: shape.diagnostics.total_km,
            geometry: shape.to_linestring().to_wkt().to_string(),
        };
        writer.serialize(row).map_err(|e| {
            TransitIoError::CsvWriteError(String::from(filenames::SHAPES_WKT), e)
        })?;
    }
    writer
        .flush()
        .map_err(|e| TransitIoError::IoError(String::from(filenames::SHAPES_WKT), e))?;
    Ok(Some(output_directory.join(filenames::SHAPES_WKT)))
}

pub(crate) fn ensure_directory(output_directory: &Path) -> Result<(), TransitIoError> {
    if output_directory.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(output_directory).map_err(|e| {
        let dirname = output_directory.to_string_lossy().to_string();
        TransitIoError::DirectoryError(dirname, e)
    })
}

/// builds a csv file writer, respecting the user's overwrite preference.
pub(crate) fn create_writer(
    directory: &Path,
    filename: &str,
    has_headers: bool,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<Option<csv::Writer<File>>, TransitIoError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        return Ok(None);
    }
    let file = File::create(&filepath)
        .map_err(|e| TransitIoError::IoError(filepath.to_string_lossy().to_string(), e))?;
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(file);
    Ok(Some(writer))
}
