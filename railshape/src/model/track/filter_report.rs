use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

use super::SegmentTags;

/// bucket name for segments without a `usage` tag.
pub const UNKNOWN_USAGE: &str = "unknown";

/// outcome of a [`super::SegmentFilter`] pass.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    pub segments_read: usize,
    pub segments_retained: usize,
    pub excluded_by_tag: usize,
    pub missing_geometry: usize,
    /// frequency of every `usage` value, missing values counted as [`UNKNOWN_USAGE`]
    pub usage_counts: HashMap<String, usize>,
    /// frequency of every `service` value that is present
    pub service_counts: HashMap<String, usize>,
}

impl FilterReport {
    pub fn record_tags(&mut self, tags: &SegmentTags) {
        self.segments_read += 1;
        let usage = tags.usage.as_deref().unwrap_or(UNKNOWN_USAGE);
        *self.usage_counts.entry(String::from(usage)).or_default() += 1;
        if let Some(service) = tags.service.as_deref().filter(|s| !s.is_empty()) {
            *self.service_counts.entry(String::from(service)).or_default() += 1;
        }
    }

    /// usage tag values, most frequent first, ties by name.
    pub fn usage_distribution(&self) -> Vec<(&str, usize)> {
        distribution(&self.usage_counts)
    }

    /// service tag values, most frequent first, ties by name.
    pub fn service_distribution(&self) -> Vec<(&str, usize)> {
        distribution(&self.service_counts)
    }
}

fn distribution(counts: &HashMap<String, usize>) -> Vec<(&str, usize)> {
    counts
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .sorted_by(|(ka, va), (kb, vb)| vb.cmp(va).then(ka.cmp(kb)))
        .collect_vec()
}

impl Display for FilterReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "read {} segments, retained {} ({} excluded by tag, {} without geometry)",
            self.segments_read,
            self.segments_retained,
            self.excluded_by_tag,
            self.missing_geometry
        )?;
        writeln!(f, "usage distribution:")?;
        for (usage, count) in self.usage_distribution() {
            writeln!(f, "  {usage}: {count}")?;
        }
        writeln!(f, "service distribution:")?;
        for (service, count) in self.service_distribution() {
            writeln!(f, "  {service}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FilterReport;
    use crate::model::track::SegmentTags;

    fn tags(usage: Option<&str>, service: Option<&str>) -> SegmentTags {
        SegmentTags {
            usage: usage.map(String::from),
            service: service.map(String::from),
        }
    }

    #[test]
    fn test_distribution_ordering() {
        let mut report = FilterReport::default();
        report.record_tags(&tags(Some("main"), None));
        report.record_tags(&tags(Some("branch"), Some("yard")));
        report.record_tags(&tags(Some("main"), Some("siding")));
        report.record_tags(&tags(None, Some("")));
        report.record_tags(&tags(Some("branch"), Some("yard")));
        assert_eq!(report.segments_read, 5);
        assert_eq!(
            report.usage_distribution(),
            vec![("branch", 2), ("main", 2), ("unknown", 1)]
        );
        assert_eq!(report.service_distribution(), vec![("yard", 2), ("siding", 1)]);
    }
}
