use serde::{Deserialize, Serialize};

use crate::dataset::record::VesselTrackPoint;
use crate::math::geodesy::{destination, distance_km};
use crate::prelude::EARTH_RADIUS_KM;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub vessel_name: String,
    pub current: Position,
    pub predicted: Position,
    pub horizon_minutes: u32,
}

/// Dead-reckons a position forward along a great circle at constant speed.
#[derive(Debug, Clone, Copy)]
pub struct PositionPredictor {
    earth_radius_km: f64,
}

impl PositionPredictor {
    pub fn new(earth_radius_km: f64) -> Self {
        Self { earth_radius_km }
    }

    pub fn predict(
        &self,
        lat: f64,
        lon: f64,
        sog_knots: f64,
        cog_deg: f64,
        minutes: f64,
    ) -> (f64, f64) {
        if minutes == 0.0 || sog_knots == 0.0 {
            return (lat, lon);
        }
        destination(
            lat,
            lon,
            cog_deg,
            distance_km(sog_knots, minutes),
            self.earth_radius_km,
        )
    }

    pub fn predict_point(
        &self,
        point: &VesselTrackPoint,
        horizon_minutes: u32,
    ) -> PredictionResult {
        let minutes = f64::from(horizon_minutes);
        let (lat, lon) = self.predict(point.lat, point.lon, point.sog, point.cog, minutes);
        PredictionResult {
            vessel_name: point.vessel_name.clone(),
            current: Position {
                lat: point.lat,
                lon: point.lon,
            },
            predicted: Position { lat, lon },
            horizon_minutes,
        }
    }
}

impl Default for PositionPredictor {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}
