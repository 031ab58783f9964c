use crate::algorithm::nearest::{NearestNodeIndex, DEFAULT_MAX_SEARCH_RADIUS_KM};
use crate::algorithm::DEFAULT_MAX_HOPS;
use crate::model::track::{SegmentFilter, DEFAULT_COORDINATE_PRECISION, MAX_COORDINATE_PRECISION};
use crate::model::transit::RouteSpec;
use crate::model::ShapeCliError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// the ONCF passenger routes with default generation parameters.
const ONCF_CONFIGURATION: &str = include_str!("../../resources/routes-oncf.toml");

/// defines behaviors for a shape generation run
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct ShapeGenerationConfiguration {
    pub segment_filter: SegmentFilter,
    /// decimals kept when rounding segment endpoints into graph nodes
    pub coordinate_precision: u32,
    pub max_search_radius_km: f64,
    pub max_hops: usize,
    pub nearest_node_index: NearestNodeIndex,
    pub parallelize: bool,
    pub overwrite: bool,
    pub routes: Vec<RouteSpec>,
}

impl Default for ShapeGenerationConfiguration {
    fn default() -> Self {
        Self {
            segment_filter: Default::default(),
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            max_search_radius_km: DEFAULT_MAX_SEARCH_RADIUS_KM,
            max_hops: DEFAULT_MAX_HOPS,
            nearest_node_index: Default::default(),
            parallelize: false,
            overwrite: true,
            routes: vec![],
        }
    }
}

impl ShapeGenerationConfiguration {
    /// the built-in configuration covering the nine ONCF routes.
    pub fn oncf() -> Result<ShapeGenerationConfiguration, ShapeCliError> {
        let conf: ShapeGenerationConfiguration = toml::from_str(ONCF_CONFIGURATION).map_err(|e| {
            ShapeCliError::ConfigurationError(format!("failure decoding built-in routes: {e}"))
        })?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn max_search_radius_meters(&self) -> f64 {
        self.max_search_radius_km * 1000.0
    }

    /// checks parameter ranges and route id uniqueness.
    pub fn validate(&self) -> Result<(), ShapeCliError> {
        if self.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(ShapeCliError::ConfigurationError(format!(
                "coordinate_precision must be at most {MAX_COORDINATE_PRECISION}, found {}",
                self.coordinate_precision
            )));
        }
        if !(self.max_search_radius_km.is_finite() && self.max_search_radius_km >= 0.0) {
            return Err(ShapeCliError::ConfigurationError(format!(
                "max_search_radius_km must be a non-negative number, found {}",
                self.max_search_radius_km
            )));
        }
        if self.max_hops == 0 {
            return Err(ShapeCliError::ConfigurationError(String::from(
                "max_hops must be positive",
            )));
        }
        let mut route_ids = HashSet::new();
        for route in self.routes.iter() {
            if !route_ids.insert(route.route_id.as_str()) {
                return Err(ShapeCliError::ConfigurationError(format!(
                    "route '{}' is configured more than once",
                    route.route_id
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<&String> for ShapeGenerationConfiguration {
    type Error = ShapeCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: ShapeGenerationConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ShapeCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                ShapeCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ShapeCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                ShapeCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(ShapeCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}
