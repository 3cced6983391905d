use std::collections::BTreeSet;

use crate::dataset::snapshot::TrackDataset;

/// The set of distinct normalized vessel names present in a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VesselRegistry {
    names: BTreeSet<String>,
}

impl VesselRegistry {
    pub fn from_dataset(dataset: &TrackDataset) -> Self {
        Self {
            names: dataset.vessel_names().map(str::to_string).collect(),
        }
    }

    pub fn all_names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn contains(&self, normalized_name: &str) -> bool {
        self.names.contains(normalized_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for VesselRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| crate::dataset::record::normalize_name(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::RawTrackRecord;
    use chrono::{TimeZone, Utc};

    #[test]
    fn registry_lists_distinct_names() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let dataset = TrackDataset::from_records(vec![
            RawTrackRecord::new("titan", ts, 1.0, 1.0, 1.0, 1.0),
            RawTrackRecord::new("TITAN ", ts, 1.0, 1.0, 1.0, 1.0),
            RawTrackRecord::new("Rainbow", ts, 1.0, 1.0, 1.0, 1.0),
        ]);
        let registry = VesselRegistry::from_dataset(&dataset);
        let names: Vec<_> = registry.all_names().iter().cloned().collect();
        assert_eq!(names, vec!["RAINBOW".to_string(), "TITAN".to_string()]);
    }

    #[test]
    fn empty_dataset_yields_empty_registry() {
        let registry = VesselRegistry::from_dataset(&TrackDataset::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn collecting_normalizes_names() {
        let registry: VesselRegistry = ["ever  lucid", "", "Titan"].into_iter().collect();
        assert!(registry.contains("EVER LUCID"));
        assert!(registry.contains("TITAN"));
        assert_eq!(registry.len(), 2);
    }
}
