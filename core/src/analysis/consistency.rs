use serde::{Deserialize, Serialize};

use crate::dataset::record::VesselTrackPoint;
use crate::math::geodesy::{haversine_km, heading_delta, initial_bearing};
use crate::prelude::{AnalysisConfig, CoreError, CoreResult};
use crate::telemetry::log::LogManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyStatus {
    Consistent,
    Inconsistent,
}

impl std::fmt::Display for ConsistencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyStatus::Consistent => f.write_str("consistent"),
            ConsistencyStatus::Inconsistent => f.write_str("inconsistent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    SpeedJump,
    SharpTurn,
}

/// One exceeded threshold. `pair_index` i refers to points i and i+1 of the
/// analyzed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    pub kind: AnomalyKind,
    pub pair_index: usize,
    pub delta: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub vessel_name: String,
    pub status: ConsistencyStatus,
    pub speeds: Vec<f64>,
    pub turns: Vec<f64>,
    /// Great-circle distance between consecutive reports, for diagnostics.
    pub distances_km: Vec<f64>,
    /// Bearing made good between consecutive positions; absent when the
    /// vessel did not move.
    pub bearings_made_good: Vec<Option<f64>>,
    pub flags: Vec<AnomalyFlag>,
    pub points_analyzed: usize,
}

/// Flags abrupt speed or heading changes between consecutive reports.
pub struct ConsistencyAnalyzer {
    speed_threshold_knots: f64,
    heading_threshold_deg: f64,
    window: usize,
    earth_radius_km: f64,
    logger: LogManager,
}

impl ConsistencyAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            speed_threshold_knots: config.speed_threshold_knots,
            heading_threshold_deg: config.heading_threshold_deg,
            window: config.effective_window(),
            earth_radius_km: config.earth_radius_km,
            logger: LogManager::new(),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Analyzes the last `window` points of an oldest-first track.
    pub fn verify(&self, track_points: &[VesselTrackPoint]) -> CoreResult<VerificationResult> {
        if track_points.len() < 2 {
            return Err(CoreError::InsufficientData {
                available: track_points.len(),
                required: 2,
            });
        }

        let start = track_points.len().saturating_sub(self.window);
        let window = &track_points[start..];

        let mut speeds = Vec::with_capacity(window.len() - 1);
        let mut turns = Vec::with_capacity(window.len() - 1);
        let mut distances_km = Vec::with_capacity(window.len() - 1);
        let mut bearings_made_good = Vec::with_capacity(window.len() - 1);
        let mut flags = Vec::new();

        for (pair_index, pair) in window.windows(2).enumerate() {
            let speed = (pair[1].sog - pair[0].sog).abs();
            let turn = heading_delta(pair[0].cog, pair[1].cog);

            if speed > self.speed_threshold_knots {
                flags.push(AnomalyFlag {
                    kind: AnomalyKind::SpeedJump,
                    pair_index,
                    delta: speed,
                    threshold: self.speed_threshold_knots,
                });
            }
            if turn > self.heading_threshold_deg {
                flags.push(AnomalyFlag {
                    kind: AnomalyKind::SharpTurn,
                    pair_index,
                    delta: turn,
                    threshold: self.heading_threshold_deg,
                });
            }
            let (from, to) = (&pair[0], &pair[1]);
            let distance =
                haversine_km(from.lat, from.lon, to.lat, to.lon, self.earth_radius_km);
            let bearing =
                (distance > 0.0).then(|| initial_bearing(from.lat, from.lon, to.lat, to.lon));

            speeds.push(speed);
            turns.push(turn);
            distances_km.push(distance);
            bearings_made_good.push(bearing);
        }

        let status = if flags.is_empty() {
            ConsistencyStatus::Consistent
        } else {
            ConsistencyStatus::Inconsistent
        };
        let vessel_name = window[0].vessel_name.clone();
        self.logger.record(&format!(
            "ConsistencyAnalyzer {} {} over {} point(s), {} flag(s)",
            vessel_name,
            status,
            window.len(),
            flags.len()
        ));

        Ok(VerificationResult {
            vessel_name,
            status,
            speeds,
            turns,
            distances_km,
            bearings_made_good,
            flags,
            points_analyzed: window.len(),
        })
    }
}

impl Default for ConsistencyAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
