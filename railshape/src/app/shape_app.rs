use super::shape_ops::{load_track_graph, RouteShapeGenerator};
use crate::config::ShapeGenerationConfiguration;
use crate::model::transit::{shape_writer, trip_ops, StationDirectory};
use crate::model::ShapeCliError;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ShapeOperation {
    /// trace GTFS shapes for the configured routes over the rail network
    Generate {
        #[arg(long, help = "Overpass JSON file of railway ways with geometry")]
        segments_file: String,
        #[arg(long, help = "GTFS stops.txt with the terminal stations")]
        stops_file: String,
        #[arg(
            long,
            help = "path to .toml or .json file with routes and generation parameters, defaults to the ONCF routes"
        )]
        configuration_file: Option<String>,
        #[arg(long, help = "output directory for shapes.txt")]
        output_directory: String,
        #[arg(long, help = "GTFS trips.txt to copy into the output directory with shape_id set")]
        trips_file: Option<String>,
        #[arg(long, default_value_t = false, help = "also write shape geometries as WKT")]
        write_wkt: bool,
    },
    /// report tag distributions and graph statistics of a segments file
    Summarize {
        #[arg(long, help = "Overpass JSON file of railway ways with geometry")]
        segments_file: String,
        #[arg(long, help = "path to .toml or .json file with generation parameters")]
        configuration_file: Option<String>,
    },
}

impl ShapeOperation {
    pub fn run(&self) -> Result<(), ShapeCliError> {
        match self {
            ShapeOperation::Generate {
                segments_file,
                stops_file,
                configuration_file,
                output_directory,
                trips_file,
                write_wkt,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                if conf.routes.is_empty() {
                    return Err(ShapeCliError::ConfigurationError(String::from(
                        "no routes configured, nothing to generate",
                    )));
                }
                let stations = StationDirectory::read_stops_txt(Path::new(stops_file))?;
                let (graph, _) = load_track_graph(Path::new(segments_file), &conf)?;
                let generator = RouteShapeGenerator::from_configuration(graph, stations, &conf);
                let report = generator.generate(&conf.routes, conf.parallelize);
                eprintln!("{report}");
                if report.shapes.is_empty() {
                    return Err(ShapeCliError::NoShapesGenerated {
                        failed: report.failures.len(),
                        degenerate: report.degenerate.len(),
                    });
                }

                let out_path = Path::new(output_directory);
                shape_writer::write_shapes_txt(&report.shapes, out_path, conf.overwrite)?;
                if *write_wkt {
                    shape_writer::write_shapes_wkt(&report.shapes, out_path, conf.overwrite)?;
                }
                if let Some(trips) = trips_file {
                    let mapping = report.route_shape_mapping();
                    trip_ops::annotate_trips(Path::new(trips), &mapping, out_path, conf.overwrite)?;
                }
                eprintln!("finished.");
                Ok(())
            }
            ShapeOperation::Summarize {
                segments_file,
                configuration_file,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let (graph, filter_report) = load_track_graph(Path::new(segments_file), &conf)?;
                let summary = json!({
                    "filter": {
                        "segments_read": filter_report.segments_read,
                        "segments_retained": filter_report.segments_retained,
                        "excluded_by_tag": filter_report.excluded_by_tag,
                        "missing_geometry": filter_report.missing_geometry,
                        "usage": filter_report.usage_distribution(),
                        "service": filter_report.service_distribution(),
                    },
                    "graph": {
                        "coordinate_precision": graph.precision(),
                        "nodes": graph.n_nodes(),
                        "segments": graph.n_segments(),
                        "edges": graph.n_edges(),
                        "malformed_segments": graph.report().malformed_segments,
                        "duplicate_segments": graph.report().duplicate_segments,
                    }
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
                Ok(())
            }
        }
    }
}

fn read_configuration(
    configuration_file: Option<&String>,
) -> Result<ShapeGenerationConfiguration, ShapeCliError> {
    match configuration_file {
        None => {
            log::info!("no configuration file given, using the built-in ONCF routes");
            ShapeGenerationConfiguration::oncf()
        }
        Some(f) => {
            log::info!("reading shape generation configuration from {f}");
            ShapeGenerationConfiguration::try_from(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeOperation;
    use crate::model::ShapeCliError;
    use std::io::Write;

    #[test]
    fn test_generate_end_to_end() {
        let directory = std::env::temp_dir().join("railshape_test_generate_end_to_end");
        let output_directory = directory.join("output");
        std::fs::create_dir_all(&directory).unwrap();

        let segments_file = directory.join("railways.json");
        std::fs::write(
            &segments_file,
            r#"{"version": 0.6, "elements": [
                {"type": "way", "id": 101, "tags": {"railway": "rail", "usage": "main"},
                 "geometry": [{"lat": 34.2541, "lon": -6.5890}, {"lat": 34.1702, "lon": -6.6601}, {"lat": 34.0892, "lon": -6.7425}]},
                {"type": "way", "id": 102, "tags": {"railway": "rail", "usage": "main"},
                 "geometry": [{"lat": 34.0892, "lon": -6.7425}, {"lat": 34.0013, "lon": -6.8532}]},
                {"type": "way", "id": 103, "tags": {"railway": "rail", "service": "siding"},
                 "geometry": [{"lat": 34.2541, "lon": -6.5890}, {"lat": 34.0013, "lon": -6.8532}]}
            ]}"#,
        )
        .unwrap();

        let stops_file = directory.join("stops.txt");
        let mut stops = std::fs::File::create(&stops_file).unwrap();
        writeln!(stops, "stop_id,stop_name,stop_lat,stop_lon").unwrap();
        writeln!(stops, "KENITRA,Kenitra,34.2540,-6.5891").unwrap();
        writeln!(stops, "RABAT_AGDAL,Rabat Agdal,34.0013,-6.8532").unwrap();
        drop(stops);

        let configuration_file = directory.join("routes.toml");
        std::fs::write(
            &configuration_file,
            r#"
            [[routes]]
            route_id = "TNR_KENITRA_RABAT"
            name = "TNR Kenitra-Rabat"
            terminals = ["KENITRA", "RABAT_AGDAL"]
            "#,
        )
        .unwrap();

        let trips_file = directory.join("trips.txt");
        std::fs::write(
            &trips_file,
            "route_id,service_id,trip_id\nTNR_KENITRA_RABAT,DAILY,T1\nOTHER,DAILY,T2\n",
        )
        .unwrap();

        let op = ShapeOperation::Generate {
            segments_file: segments_file.to_string_lossy().to_string(),
            stops_file: stops_file.to_string_lossy().to_string(),
            configuration_file: Some(configuration_file.to_string_lossy().to_string()),
            output_directory: output_directory.to_string_lossy().to_string(),
            trips_file: Some(trips_file.to_string_lossy().to_string()),
            write_wkt: true,
        };
        op.run().unwrap();

        let shapes = std::fs::read_to_string(output_directory.join("shapes.txt")).unwrap();
        let lines: Vec<&str> = shapes.lines().collect();
        // the siding shortcut is filtered out, so the path uses both main line ways
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "TNR_KENITRA_RABAT,34.254100,-6.589000,1,0.0");
        assert!(lines[4].starts_with("TNR_KENITRA_RABAT,34.001300,-6.853200,4,"));

        let trips = std::fs::read_to_string(output_directory.join("trips.txt")).unwrap();
        let lines: Vec<&str> = trips.lines().collect();
        assert_eq!(lines[0], "route_id,service_id,trip_id,shape_id");
        assert_eq!(lines[1], "TNR_KENITRA_RABAT,DAILY,T1,TNR_KENITRA_RABAT");
        assert_eq!(lines[2], "OTHER,DAILY,T2,");

        assert!(output_directory.join("shapes-wkt.csv").exists());
        std::fs::remove_dir_all(directory).unwrap();
    }

    #[test]
    fn test_generate_without_routes_fails() {
        let directory = std::env::temp_dir().join("railshape_test_generate_no_routes");
        std::fs::create_dir_all(&directory).unwrap();
        let configuration_file = directory.join("empty.toml");
        std::fs::write(&configuration_file, "max_hops = 100\n").unwrap();
        let op = ShapeOperation::Generate {
            segments_file: String::from("railways.json"),
            stops_file: String::from("stops.txt"),
            configuration_file: Some(configuration_file.to_string_lossy().to_string()),
            output_directory: String::from("out"),
            trips_file: None,
            write_wkt: false,
        };
        assert!(matches!(op.run(), Err(ShapeCliError::ConfigurationError(_))));
        std::fs::remove_dir_all(directory).unwrap();
    }

    #[test]
    fn test_only_degenerate_routes_is_an_error() {
        let directory = std::env::temp_dir().join("railshape_test_generate_degenerate");
        let output_directory = directory.join("output");
        std::fs::create_dir_all(&directory).unwrap();

        let segments_file = directory.join("railways.json");
        std::fs::write(
            &segments_file,
            r#"[{"type": "way", "id": 201, "tags": {"usage": "main"},
                 "geometry": [{"lat": 33.5899, "lon": -7.5904}, {"lat": 33.6012, "lon": -7.5421}]}]"#,
        )
        .unwrap();
        let stops_file = directory.join("stops.txt");
        std::fs::write(
            &stops_file,
            "stop_id,stop_name,stop_lat,stop_lon\nCASA_VOYAGEURS,Casa Voyageurs,33.5899,-7.5904\nCASA_PORT,Casa Port,33.5901,-7.5906\n",
        )
        .unwrap();
        let configuration_file = directory.join("routes.json");
        std::fs::write(
            &configuration_file,
            r#"{"routes": [{"route_id": "CASA_SHUTTLE", "name": "Casa shuttle",
                "terminals": ["CASA_VOYAGEURS", "CASA_PORT"]}]}"#,
        )
        .unwrap();

        let op = ShapeOperation::Generate {
            segments_file: segments_file.to_string_lossy().to_string(),
            stops_file: stops_file.to_string_lossy().to_string(),
            configuration_file: Some(configuration_file.to_string_lossy().to_string()),
            output_directory: output_directory.to_string_lossy().to_string(),
            trips_file: None,
            write_wkt: false,
        };
        let error = op.run().unwrap_err();
        assert!(matches!(
            error,
            ShapeCliError::NoShapesGenerated {
                failed: 0,
                degenerate: 1
            }
        ));
        assert!(error.to_string().contains("0 routes failed, 1 routes had both terminals"));
        assert!(!output_directory.join("shapes.txt").exists());
        std::fs::remove_dir_all(directory).unwrap();
    }
}
