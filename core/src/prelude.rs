use serde::{Deserialize, Serialize};

pub const FUZZY_THRESHOLD: u8 = 75;
pub const SPEED_THRESHOLD_KNOTS: f64 = 50.0;
pub const HEADING_THRESHOLD_DEG: f64 = 90.0;
pub const ANALYSIS_WINDOW: usize = 3;
pub const DEFAULT_PREDICT_HORIZON_MINUTES: u32 = 30;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Tunable thresholds shared by the resolver, predictor and analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub fuzzy_threshold: u8,
    pub speed_threshold_knots: f64,
    pub heading_threshold_deg: f64,
    pub analysis_window: usize,
    pub default_predict_horizon_minutes: u32,
    pub earth_radius_km: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: FUZZY_THRESHOLD,
            speed_threshold_knots: SPEED_THRESHOLD_KNOTS,
            heading_threshold_deg: HEADING_THRESHOLD_DEG,
            analysis_window: ANALYSIS_WINDOW,
            default_predict_horizon_minutes: DEFAULT_PREDICT_HORIZON_MINUTES,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl AnalysisConfig {
    /// Verification window, never smaller than a single consecutive pair.
    pub fn effective_window(&self) -> usize {
        self.analysis_window.max(2)
    }
}

/// Common error type for dataset access and analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("vessel not found: {0}")]
    VesselNotFound(String),
    #[error("insufficient data: {available} point(s) available, {required} required")]
    InsufficientData { available: usize, required: usize },
    #[error("invalid record {index} for {vessel}: {reason}")]
    InvalidRecord {
        vessel: String,
        index: usize,
        reason: String,
    },
    #[error("dataset load failure: {0}")]
    Load(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Similarity metric used by the name resolver, scored 0..=100.
///
/// Implemented for plain functions and closures so an alternative metric can
/// be dropped in without touching the resolver.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, candidate: &str, known: &str) -> u8;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> u8 + Send + Sync,
{
    fn score(&self, candidate: &str, known: &str) -> u8 {
        self(candidate, known)
    }
}
