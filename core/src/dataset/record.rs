use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prelude::{CoreError, CoreResult};

/// Trims, uppercases and collapses internal whitespace runs to one space.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One AIS report as handed over by a loader, before range validation.
///
/// Kinematic fields stay optional so a damaged row can still be stored and
/// only fails when it is actually read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrackRecord {
    pub vessel_name: String,
    pub timestamp: DateTime<Utc>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub sog: Option<f64>,
    pub cog: Option<f64>,
}

impl RawTrackRecord {
    pub fn new(
        vessel_name: &str,
        timestamp: DateTime<Utc>,
        lat: f64,
        lon: f64,
        sog: f64,
        cog: f64,
    ) -> Self {
        Self {
            vessel_name: vessel_name.to_string(),
            timestamp,
            lat: Some(lat),
            lon: Some(lon),
            sog: Some(sog),
            cog: Some(cog),
        }
    }

    /// Range-checks every field, producing the immutable point on success.
    /// `index` is the record's position within its vessel's track.
    pub fn validate(&self, index: usize) -> CoreResult<VesselTrackPoint> {
        let invalid = |reason: String| CoreError::InvalidRecord {
            vessel: self.vessel_name.clone(),
            index,
            reason,
        };
        let field = |name: &str, value: Option<f64>| {
            value
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(format!("missing or non-numeric {}", name)))
        };

        let lat = field("latitude", self.lat)?;
        let lon = field("longitude", self.lon)?;
        let sog = field("speed over ground", self.sog)?;
        let cog = field("course over ground", self.cog)?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid(format!("latitude {} out of range", lat)));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid(format!("longitude {} out of range", lon)));
        }
        if sog < 0.0 {
            return Err(invalid(format!("negative speed over ground {}", sog)));
        }
        if !(0.0..360.0).contains(&cog) {
            return Err(invalid(format!("course over ground {} out of range", cog)));
        }

        Ok(VesselTrackPoint {
            vessel_name: self.vessel_name.clone(),
            timestamp: self.timestamp,
            lat,
            lon,
            sog,
            cog,
        })
    }
}

/// Validated AIS position report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselTrackPoint {
    pub vessel_name: String,
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub sog: f64,
    pub cog: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_name("  ever   lucid \t"), "EVER LUCID");
        assert_eq!(normalize_name("Titan"), "TITAN");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn validate_accepts_in_range_record() {
        let record = RawTrackRecord::new("TITAN", ts(), 41.64, -70.91, 7.1, 45.0);
        let point = record.validate(0).unwrap();
        assert_eq!(point.lat, 41.64);
        assert_eq!(point.cog, 45.0);
    }

    #[test]
    fn validate_rejects_missing_and_out_of_range_fields() {
        let mut record = RawTrackRecord::new("TITAN", ts(), 41.64, -70.91, 7.1, 45.0);
        record.sog = None;
        assert!(matches!(
            record.validate(3),
            Err(CoreError::InvalidRecord { index: 3, .. })
        ));

        let record = RawTrackRecord::new("TITAN", ts(), 95.0, -70.91, 7.1, 45.0);
        assert!(record.validate(0).is_err());

        let record = RawTrackRecord::new("TITAN", ts(), 41.0, -70.91, 7.1, 360.0);
        assert!(record.validate(0).is_err());

        let record = RawTrackRecord::new("TITAN", ts(), 41.0, -70.91, -1.0, 10.0);
        assert!(record.validate(0).is_err());
    }
}
