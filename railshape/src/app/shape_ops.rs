use super::RouteShapeError;
use crate::algorithm::nearest::{find_nearest_node, NearestNode, NearestNodeFinder};
use crate::algorithm::{assemble_path, bfs_shortest_path};
use crate::config::ShapeGenerationConfiguration;
use crate::model::track::{
    segment_source, CoordinateKey, FilterReport, TrackError, TrackGraph,
};
use crate::model::transit::{RouteShapeMapping, RouteSpec, Shape, Station, StationDirectory};
use kdam::tqdm;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;

/// reads, filters and links the track segments of a run.
pub fn load_track_graph(
    segments_file: &Path,
    conf: &ShapeGenerationConfiguration,
) -> Result<(TrackGraph, FilterReport), TrackError> {
    let segments = segment_source::read_segments(segments_file)?;
    let (retained, filter_report) = conf.segment_filter.apply(segments);
    log::info!(
        "retained {} of {} segments ({} excluded by tag, {} without geometry)",
        filter_report.segments_retained,
        filter_report.segments_read,
        filter_report.excluded_by_tag,
        filter_report.missing_geometry
    );
    let graph = TrackGraph::build(retained, conf.coordinate_precision)?;
    Ok((graph, filter_report))
}

/// the result of a route that resolved without error.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Resolved(Shape),
    /// both terminals snapped onto the same node, there is nothing to trace
    Degenerate(CoordinateKey),
}

#[derive(Debug, Clone, Serialize)]
pub struct DegenerateRoute {
    pub route_id: String,
    pub node: String,
}

#[derive(Debug)]
pub struct RouteFailure {
    pub route_id: String,
    pub error: RouteShapeError,
}

/// per-route results of a batch, in route configuration order.
#[derive(Debug, Default)]
pub struct ShapeGenerationReport {
    pub shapes: Vec<Shape>,
    pub degenerate: Vec<DegenerateRoute>,
    pub failures: Vec<RouteFailure>,
}

impl ShapeGenerationReport {
    /// route id to shape id for every route with a shape.
    pub fn route_shape_mapping(&self) -> RouteShapeMapping {
        self.shapes
            .iter()
            .map(|s| (s.route_id.clone(), s.shape_id.clone()))
            .collect()
    }

    pub fn n_routes(&self) -> usize {
        self.shapes.len() + self.degenerate.len() + self.failures.len()
    }
}

impl Display for ShapeGenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} of {} routes resolved, {} degenerate, {} failed",
            self.shapes.len(),
            self.n_routes(),
            self.degenerate.len(),
            self.failures.len()
        )?;
        for shape in self.shapes.iter() {
            writeln!(f, "  {shape}")?;
        }
        for route in self.degenerate.iter() {
            writeln!(f, "  {}: both terminals at node {}", route.route_id, route.node)?;
        }
        for failure in self.failures.iter() {
            writeln!(f, "  {}: {}", failure.route_id, failure.error)?;
        }
        Ok(())
    }
}

/// traces route shapes over a built track graph.
pub struct RouteShapeGenerator {
    graph: TrackGraph,
    stations: StationDirectory,
    finder: Box<dyn NearestNodeFinder>,
    max_radius_meters: f64,
    max_hops: usize,
}

impl RouteShapeGenerator {
    pub fn new(
        graph: TrackGraph,
        stations: StationDirectory,
        finder: Box<dyn NearestNodeFinder>,
        max_radius_meters: f64,
        max_hops: usize,
    ) -> RouteShapeGenerator {
        RouteShapeGenerator {
            graph,
            stations,
            finder,
            max_radius_meters,
            max_hops,
        }
    }

    pub fn from_configuration(
        graph: TrackGraph,
        stations: StationDirectory,
        conf: &ShapeGenerationConfiguration,
    ) -> RouteShapeGenerator {
        let finder = conf.nearest_node_index.build(&graph);
        RouteShapeGenerator::new(
            graph,
            stations,
            finder,
            conf.max_search_radius_meters(),
            conf.max_hops,
        )
    }

    pub fn graph(&self) -> &TrackGraph {
        &self.graph
    }

    /// traces every route. a failing route is recorded and does not affect
    /// the others. results keep the order of `routes` even when run in
    /// parallel.
    pub fn generate(&self, routes: &[RouteSpec], parallelize: bool) -> ShapeGenerationReport {
        let outcomes: Vec<(&RouteSpec, Result<RouteOutcome, RouteShapeError>)> = if parallelize {
            routes
                .par_iter()
                .map(|route| (route, self.generate_route(route)))
                .collect()
        } else {
            tqdm!(routes.iter(), total = routes.len(), desc = "generate route shapes")
                .map(|route| (route, self.generate_route(route)))
                .collect()
        };
        if !parallelize {
            eprintln!();
        }

        let mut report = ShapeGenerationReport::default();
        for (route, outcome) in outcomes {
            match outcome {
                Ok(RouteOutcome::Resolved(shape)) => {
                    log::info!("{route}: {shape}");
                    report.shapes.push(shape);
                }
                Ok(RouteOutcome::Degenerate(node)) => {
                    log::warn!("{route}: both terminals snap onto node {node}, no shape");
                    report.degenerate.push(DegenerateRoute {
                        route_id: route.route_id.clone(),
                        node: node.to_string(),
                    });
                }
                Err(error) => {
                    log::warn!("{route}: {error}");
                    report.failures.push(RouteFailure {
                        route_id: route.route_id.clone(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// traces the shape of a single route from its origin to its destination.
    pub fn generate_route(&self, route: &RouteSpec) -> Result<RouteOutcome, RouteShapeError> {
        let (origin_id, destination_id) = &route.terminals;
        // both terminals must exist before either is snapped
        let origin_station = self.lookup_station(route, origin_id)?;
        let destination_station = self.lookup_station(route, destination_id)?;
        let origin = self.snap_station(origin_station)?;
        let destination = self.snap_station(destination_station)?;
        log::debug!(
            "{}: {} snapped to {} ({:.1}m), {} snapped to {} ({:.1}m)",
            route.route_id,
            origin_id,
            origin.key,
            origin.distance_meters,
            destination_id,
            destination.key,
            destination.distance_meters
        );

        let path = bfs_shortest_path(&self.graph, origin.key, destination.key, self.max_hops)
            .map_err(|source| RouteShapeError::NoPathFound { source })?;
        if path.is_empty() {
            return Ok(RouteOutcome::Degenerate(origin.key));
        }

        let assembled = assemble_path(&path, self.graph.geometry_store())
            .map_err(|source| RouteShapeError::AssemblyFailed { source })?;
        log::debug!(
            "{}: {} segments, {} junction points merged",
            route.route_id,
            assembled.segments,
            assembled.junctions_removed
        );
        let shape = Shape::new(
            route.shape_id(),
            &route.route_id,
            &assembled,
            origin.distance_meters,
            destination.distance_meters,
        );
        Ok(RouteOutcome::Resolved(shape))
    }

    fn lookup_station(
        &self,
        route: &RouteSpec,
        station_id: &str,
    ) -> Result<&Station, RouteShapeError> {
        self.stations
            .get(station_id)
            .ok_or_else(|| RouteShapeError::MissingStationData {
                route_id: route.route_id.clone(),
                station_id: String::from(station_id),
            })
    }

    fn snap_station(&self, station: &Station) -> Result<NearestNode, RouteShapeError> {
        find_nearest_node(
            self.finder.as_ref(),
            &station.coordinate,
            self.max_radius_meters,
        )
        .map_err(|source| RouteShapeError::NodeNotFound {
            station_id: station.station_id.clone(),
            source,
        })
    }
}
