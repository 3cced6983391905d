use std::collections::BTreeMap;

use log::{debug, warn};

use crate::dataset::record::{normalize_name, RawTrackRecord};

/// Immutable, per-vessel view over a loaded AIS table.
///
/// Built once from loader output: names are normalized, records grouped by
/// vessel and each track sorted by timestamp. Nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct TrackDataset {
    tracks: BTreeMap<String, Vec<RawTrackRecord>>,
    skipped: usize,
}

impl TrackDataset {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawTrackRecord>,
    {
        let mut tracks: BTreeMap<String, Vec<RawTrackRecord>> = BTreeMap::new();
        let mut skipped = 0;

        for mut record in records {
            let name = normalize_name(&record.vessel_name);
            if name.is_empty() {
                skipped += 1;
                continue;
            }
            record.vessel_name = name.clone();
            tracks.entry(name).or_default().push(record);
        }

        for track in tracks.values_mut() {
            track.sort_by_key(|record| record.timestamp);
        }

        if skipped > 0 {
            warn!("skipped {} record(s) without a vessel name", skipped);
        }
        debug!(
            "dataset snapshot built: {} vessel(s), {} record(s)",
            tracks.len(),
            tracks.values().map(Vec::len).sum::<usize>()
        );

        Self { tracks, skipped }
    }

    /// Raw records for a normalized vessel name, oldest first.
    pub fn records(&self, normalized_name: &str) -> Option<&[RawTrackRecord]> {
        self.tracks.get(normalized_name).map(Vec::as_slice)
    }

    pub fn vessel_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    pub fn vessel_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn record_count(&self) -> usize {
        self.tracks.values().map(Vec::len).sum()
    }

    /// Rows dropped during construction because they had no usable name.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(name: &str, minute: u32) -> RawTrackRecord {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 12, minute, 0).unwrap();
        RawTrackRecord::new(name, ts, 41.0, -70.0, 5.0, 90.0)
    }

    #[test]
    fn groups_by_normalized_name_and_sorts() {
        let dataset = TrackDataset::from_records(vec![
            record(" titan ", 30),
            record("TITAN", 10),
            record("ever  lucid", 5),
            record("Titan", 20),
        ]);

        assert_eq!(dataset.vessel_count(), 2);
        let titan = dataset.records("TITAN").unwrap();
        let minutes: Vec<_> = titan.iter().map(|r| r.timestamp.format("%M").to_string()).collect();
        assert_eq!(minutes, vec!["10", "20", "30"]);
        assert!(titan.iter().all(|r| r.vessel_name == "TITAN"));
        assert!(dataset.records("EVER LUCID").is_some());
    }

    #[test]
    fn nameless_rows_are_skipped() {
        let dataset = TrackDataset::from_records(vec![record("  ", 1), record("TITAN", 2)]);
        assert_eq!(dataset.skipped(), 1);
        assert_eq!(dataset.record_count(), 1);
    }

    #[test]
    fn empty_dataset_has_no_vessels() {
        let dataset = TrackDataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.vessel_names().count(), 0);
    }
}
