use super::TransitIoError;
use crate::model::track::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

/// a rail station with its reference position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub coordinate: GeoPoint,
}

impl Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}' at {}", self.station_id, self.name, self.coordinate)
    }
}

/// a row of a GTFS stops.txt file. stops without coordinates are tolerated on
/// read and left out of the directory.
#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: String,
    #[serde(default)]
    stop_name: String,
    stop_lat: Option<f64>,
    stop_lon: Option<f64>,
}

/// read-only lookup of stations by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationDirectory(HashMap<String, Station>);

impl StationDirectory {
    pub fn new(stations: Vec<Station>) -> StationDirectory {
        StationDirectory(
            stations
                .into_iter()
                .map(|s| (s.station_id.clone(), s))
                .collect(),
        )
    }

    pub fn get(&self, station_id: &str) -> Option<&Station> {
        self.0.get(station_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// reads stations from a GTFS stops.txt file. columns other than
    /// stop_id, stop_name, stop_lat and stop_lon are ignored.
    pub fn read_stops_txt(filepath: &Path) -> Result<StationDirectory, TransitIoError> {
        let filename = filepath.to_string_lossy().to_string();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(filepath)
            .map_err(|e| TransitIoError::CsvReadError(filename.clone(), e))?;
        let rows = reader
            .into_deserialize::<StopRow>()
            .map(|r| r.map_err(|e| TransitIoError::CsvReadError(filename.clone(), e)))
            .collect::<Result<Vec<StopRow>, TransitIoError>>()?;

        let mut stations: HashMap<String, Station> = HashMap::new();
        let mut missing_coordinates = 0;
        for row in rows {
            let (lat, lon) = match (row.stop_lat, row.stop_lon) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    log::warn!("stop '{}' has no coordinates, skipping", row.stop_id);
                    missing_coordinates += 1;
                    continue;
                }
            };
            if stations.contains_key(&row.stop_id) {
                return Err(TransitIoError::DuplicateStation(row.stop_id, filename));
            }
            let station = Station {
                station_id: row.stop_id.clone(),
                name: row.stop_name,
                coordinate: GeoPoint::new(lat, lon),
            };
            stations.insert(row.stop_id, station);
        }
        log::info!(
            "read {} stations from {} ({} without coordinates)",
            stations.len(),
            filename,
            missing_coordinates
        );
        Ok(StationDirectory(stations))
    }
}

#[cfg(test)]
mod tests {
    use super::StationDirectory;
    use std::io::Write;

    #[test]
    fn test_read_stops_txt() {
        let filepath = std::env::temp_dir().join("railshape_test_read_stops.txt");
        let mut file = std::fs::File::create(&filepath).unwrap();
        writeln!(file, "stop_id,stop_code,stop_name,stop_lat,stop_lon,location_type").unwrap();
        writeln!(file, "RABAT_AGDAL,,Rabat Agdal,34.0013,-6.8532,0").unwrap();
        writeln!(file, "KENITRA,,\"Kenitra, Gare\",34.2541,-6.5890,0").unwrap();
        writeln!(file, "NOWHERE,,Nowhere,,,1").unwrap();
        drop(file);

        let directory = StationDirectory::read_stops_txt(&filepath).unwrap();
        assert_eq!(directory.len(), 2);
        let kenitra = directory.get("KENITRA").unwrap();
        assert_eq!(kenitra.name, "Kenitra, Gare");
        assert_eq!(kenitra.coordinate.lat, 34.2541);
        assert_eq!(kenitra.coordinate.lon, -6.5890);
        assert!(directory.get("NOWHERE").is_none());
        std::fs::remove_file(filepath).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let filepath = std::env::temp_dir().join("railshape_test_no_such_stops.txt");
        assert!(StationDirectory::read_stops_txt(&filepath).is_err());
    }
}
