use super::{FilterReport, TrackSegment};
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// `usage` values of railway ways that never carry passenger services.
pub const EXCLUDED_USAGE: [&str; 2] = ["military", "industrial"];

/// `service` values of railway ways that are not running lines.
pub const EXCLUDED_SERVICE: [&str; 4] = ["yard", "siding", "spur", "crossover"];

/// decides which raw track segments take part in the track graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SegmentFilter {
    /// accepts every segment that has a geometry
    NoFilter,
    /// main passenger rail: rejects segments with an excluded `usage` or
    /// `service` tag. segments without those tags are accepted.
    PassengerRail {
        #[serde(default = "default_excluded_usage")]
        excluded_usage: HashSet<String>,
        #[serde(default = "default_excluded_service")]
        excluded_service: HashSet<String>,
    },
}

impl Default for SegmentFilter {
    fn default() -> Self {
        SegmentFilter::PassengerRail {
            excluded_usage: default_excluded_usage(),
            excluded_service: default_excluded_service(),
        }
    }
}

impl SegmentFilter {
    /// tests the classification tags of a segment. geometry is not considered.
    pub fn accept(&self, segment: &TrackSegment) -> bool {
        use SegmentFilter as F;
        match self {
            F::NoFilter => true,
            F::PassengerRail {
                excluded_usage,
                excluded_service,
            } => {
                let usage_excluded = matches!(&segment.tags.usage, Some(u) if excluded_usage.contains(u));
                let service_excluded = matches!(&segment.tags.service, Some(s) if excluded_service.contains(s));
                !usage_excluded && !service_excluded
            }
        }
    }

    /// filters the raw segments, dropping excluded tags and segments without
    /// a geometry. tag frequencies are tallied over the full input.
    pub fn apply(&self, segments: Vec<TrackSegment>) -> (Vec<TrackSegment>, FilterReport) {
        let mut report = FilterReport::default();
        let mut retained = Vec::with_capacity(segments.len());
        let total = segments.len();
        let iter = tqdm!(segments.into_iter(), total = total, desc = "filter track segments");
        for segment in iter {
            report.record_tags(&segment.tags);
            if !self.accept(&segment) {
                log::debug!("excluded by tag: {segment}");
                report.excluded_by_tag += 1;
            } else if segment.geometry.is_empty() {
                log::debug!("missing geometry: {segment}");
                report.missing_geometry += 1;
            } else {
                retained.push(segment);
            }
        }
        eprintln!();
        report.segments_retained = retained.len();
        (retained, report)
    }
}

fn default_excluded_usage() -> HashSet<String> {
    EXCLUDED_USAGE.iter().map(|s| String::from(*s)).collect()
}

fn default_excluded_service() -> HashSet<String> {
    EXCLUDED_SERVICE.iter().map(|s| String::from(*s)).collect()
}
