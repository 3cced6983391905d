use crate::dataset::record::{normalize_name, RawTrackRecord, VesselTrackPoint};
use crate::dataset::snapshot::TrackDataset;
use crate::prelude::{CoreError, CoreResult};

/// Read-only position history lookups over a dataset snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TrackAccessor<'a> {
    dataset: &'a TrackDataset,
}

impl<'a> TrackAccessor<'a> {
    pub fn new(dataset: &'a TrackDataset) -> Self {
        Self { dataset }
    }

    fn records(&self, vessel_name: &str) -> CoreResult<&'a [RawTrackRecord]> {
        let normalized = normalize_name(vessel_name);
        match self.dataset.records(&normalized) {
            Some(records) if !records.is_empty() => Ok(records),
            _ => Err(CoreError::VesselNotFound(normalized)),
        }
    }

    /// Point with the greatest timestamp.
    pub fn latest(&self, vessel_name: &str) -> CoreResult<VesselTrackPoint> {
        let records = self.records(vessel_name)?;
        let index = records.len() - 1;
        records[index].validate(index)
    }

    /// Up to `n` most recent points, oldest first. Short tracks yield fewer.
    pub fn recent(&self, vessel_name: &str, n: usize) -> CoreResult<Vec<VesselTrackPoint>> {
        let records = self.records(vessel_name)?;
        let start = records.len().saturating_sub(n);
        records[start..]
            .iter()
            .enumerate()
            .map(|(offset, record)| record.validate(start + offset))
            .collect()
    }

    /// Whole validated track, oldest first.
    pub fn track(&self, vessel_name: &str) -> CoreResult<Vec<VesselTrackPoint>> {
        let records = self.records(vessel_name)?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect()
    }
}
