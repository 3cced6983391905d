use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use vesselcore::analysis::PositionPredictor;
use vesselcore::dataset::{RawTrackRecord, TrackDataset};

/// Starting state of one synthetic vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoVessel {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub sog: f64,
    pub cog: f64,
    /// Adds this many knots to the final report to provoke a speed anomaly.
    #[serde(default)]
    pub final_speed_jump: f64,
}

impl DemoVessel {
    fn new(name: &str, lat: f64, lon: f64, sog: f64, cog: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
            sog,
            cog,
            final_speed_jump: 0.0,
        }
    }
}

/// Configuration for generating a synthetic AIS dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub vessels: Vec<DemoVessel>,
    pub points_per_vessel: usize,
    pub interval_minutes: i64,
    pub speed_jitter_knots: f64,
    pub course_jitter_deg: f64,
    pub seed: u64,
    pub start: DateTime<Utc>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let mut sea_witch = DemoVessel::new("SEA WITCH", 41.50, -70.60, 12.0, 200.0);
        sea_witch.final_speed_jump = 55.0;
        Self {
            vessels: vec![
                DemoVessel::new("TITAN", 41.55, -71.00, 7.1, 45.0),
                DemoVessel::new("RAINBOW", 41.60, -70.95, 12.0, 90.0),
                DemoVessel::new("EVER LUCID", 41.30, -70.40, 15.5, 135.0),
                DemoVessel::new("NORDIC STAR", 41.70, -70.20, 9.0, 350.0),
                sea_witch,
            ],
            points_per_vessel: 12,
            interval_minutes: 5,
            speed_jitter_knots: 0.4,
            course_jitter_deg: 2.0,
            seed: 0,
            start: Utc
                .with_ymd_and_hms(2024, 1, 5, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

fn build_track(
    vessel: &DemoVessel,
    config: &GeneratorConfig,
    rng: &mut StdRng,
    predictor: &PositionPredictor,
) -> anyhow::Result<Vec<RawTrackRecord>> {
    let count = config.points_per_vessel.max(1);
    let mut records = Vec::with_capacity(count);
    let (mut lat, mut lon) = (vessel.lat, vessel.lon);

    for index in 0..count {
        let offset = config
            .interval_minutes
            .checked_mul(index as i64)
            .context("overflow computing report offset for generator")?;
        let timestamp = config.start + Duration::minutes(offset);

        let speed_noise = if config.speed_jitter_knots > 0.0 {
            rng.gen_range(-config.speed_jitter_knots..config.speed_jitter_knots)
        } else {
            0.0
        };
        let course_noise = if config.course_jitter_deg > 0.0 {
            rng.gen_range(-config.course_jitter_deg..config.course_jitter_deg)
        } else {
            0.0
        };
        let mut sog = (vessel.sog + speed_noise).max(0.0);
        if index + 1 == count {
            sog += vessel.final_speed_jump;
        }
        let cog = (vessel.cog + course_noise).rem_euclid(360.0) % 360.0;

        records.push(RawTrackRecord::new(&vessel.name, timestamp, lat, lon, sog, cog));
        (lat, lon) = predictor.predict(lat, lon, sog, cog, config.interval_minutes as f64);
    }

    Ok(records)
}

/// Builds reproducible demo tracks by dead-reckoning each vessel forward.
pub fn build_demo_dataset_from_config(config: &GeneratorConfig) -> anyhow::Result<TrackDataset> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let predictor = PositionPredictor::default();
    let mut records = Vec::new();
    for vessel in &config.vessels {
        records.extend(build_track(vessel, config, &mut rng, &predictor)?);
    }
    Ok(TrackDataset::from_records(records))
}

pub fn build_demo_dataset() -> anyhow::Result<TrackDataset> {
    build_demo_dataset_from_config(&GeneratorConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesselcore::analysis::TrackAccessor;

    #[test]
    fn generator_builds_expected_record_count() {
        let dataset = build_demo_dataset().unwrap();
        assert_eq!(dataset.vessel_count(), 5);
        assert_eq!(dataset.record_count(), 5 * 12);
    }

    #[test]
    fn generator_is_reproducible_for_a_seed() {
        let config = GeneratorConfig {
            seed: 13,
            ..Default::default()
        };
        let a = build_demo_dataset_from_config(&config).unwrap();
        let b = build_demo_dataset_from_config(&config).unwrap();
        assert_eq!(a.records("TITAN"), b.records("TITAN"));
    }

    #[test]
    fn generated_points_are_valid_and_move() {
        let dataset = build_demo_dataset().unwrap();
        let track = TrackAccessor::new(&dataset).track("RAINBOW").unwrap();
        assert_eq!(track.len(), 12);
        assert!(track[11].lon > track[0].lon);
        assert!(track.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn speed_jump_lands_on_final_report() {
        let dataset = build_demo_dataset().unwrap();
        let recent = TrackAccessor::new(&dataset).recent("SEA WITCH", 2).unwrap();
        assert!(recent[1].sog - recent[0].sog > 50.0);
    }
}
