use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{GeoPoint, SegmentId};

/// classification tags of a railway way. only the tags used for filtering
/// are retained, all others are discarded during deserialization.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTags {
    pub usage: Option<String>,
    pub service: Option<String>,
}

/// a railway way with its full geometry. immutable once loaded.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: SegmentId,
    #[serde(default)]
    pub tags: SegmentTags,
    #[serde(default, deserialize_with = "deserialize_geometry")]
    pub geometry: Vec<GeoPoint>,
}

impl TrackSegment {
    pub fn new(id: i64, geometry: Vec<GeoPoint>) -> TrackSegment {
        TrackSegment {
            id: SegmentId(id),
            tags: SegmentTags::default(),
            geometry,
        }
    }

    pub fn with_tags(mut self, usage: Option<&str>, service: Option<&str>) -> TrackSegment {
        self.tags = SegmentTags {
            usage: usage.map(String::from),
            service: service.map(String::from),
        };
        self
    }

    /// first and last positions, if the segment has at least two points.
    pub fn endpoints(&self) -> Option<(&GeoPoint, &GeoPoint)> {
        match self.geometry.as_slice() {
            [first, .., last] => Some((first, last)),
            _ => None,
        }
    }

    /// length of the polyline in meters.
    pub fn length_meters(&self) -> f64 {
        self.geometry
            .windows(2)
            .map(|pair| pair[0].haversine_meters(&pair[1]))
            .sum()
    }
}

impl Display for TrackSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let usage = self.tags.usage.as_deref().unwrap_or("<missing>");
        let service = self.tags.service.as_deref().unwrap_or("<missing>");
        write!(
            f,
            "TrackSegment with id={}, usage={}, service={} and {} points",
            self.id,
            usage,
            service,
            self.geometry.len()
        )
    }
}

/// Overpass emits `"geometry": null` for ways clipped out of the query
/// extent, so a null geometry is read as an empty one.
fn deserialize_geometry<'de, D>(deserializer: D) -> Result<Vec<GeoPoint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let geometry: Option<Vec<GeoPoint>> = Option::deserialize(deserializer)?;
    Ok(geometry.unwrap_or_default())
}
