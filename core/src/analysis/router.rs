use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::consistency::{ConsistencyAnalyzer, VerificationResult};
use crate::analysis::predictor::{PositionPredictor, PredictionResult};
use crate::analysis::track::TrackAccessor;
use crate::dataset::record::VesselTrackPoint;
use crate::dataset::registry::VesselRegistry;
use crate::dataset::snapshot::TrackDataset;
use crate::prelude::{AnalysisConfig, CoreError, CoreResult};
use crate::query::intent::Intent;
use crate::query::parser::{ParsedQuery, QueryParser};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, QueryMetrics};

/// Where a query stopped short of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// No recognizable intent in the text.
    Parse,
    /// No candidate phrase matched a known vessel.
    Resolution,
    /// Track lookup failed: unknown vessel or an unusable record.
    Lookup,
    /// Not enough points for the requested analysis.
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFailure {
    pub stage: FailureStage,
    pub message: String,
}

impl QueryFailure {
    fn from_error(err: CoreError) -> Self {
        let stage = match err {
            CoreError::InsufficientData { .. } => FailureStage::Analysis,
            CoreError::VesselNotFound(_) | CoreError::InvalidRecord { .. } | CoreError::Load(_) => {
                FailureStage::Lookup
            }
        };
        Self {
            stage,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    Position(VesselTrackPoint),
    Prediction(PredictionResult),
    Verification(VerificationResult),
    Failed(QueryFailure),
}

impl QueryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

/// Parsed query together with what the router made of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub parsed: ParsedQuery,
    pub outcome: QueryOutcome,
}

/// Handler selected for a parsed query.
#[derive(Debug, Clone, Copy)]
enum Action {
    Show,
    Predict { horizon_minutes: u32 },
    Verify,
}

/// Owns a dataset snapshot and routes parsed queries to the matching handler.
pub struct QueryRouter {
    dataset: Arc<TrackDataset>,
    registry: VesselRegistry,
    parser: QueryParser,
    predictor: PositionPredictor,
    analyzer: ConsistencyAnalyzer,
    config: AnalysisConfig,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl QueryRouter {
    pub fn new(dataset: Arc<TrackDataset>, config: AnalysisConfig) -> Self {
        let parser = QueryParser::from_config(&config);
        Self::with_parser(dataset, config, parser)
    }

    pub fn with_parser(
        dataset: Arc<TrackDataset>,
        config: AnalysisConfig,
        parser: QueryParser,
    ) -> Self {
        let registry = VesselRegistry::from_dataset(&dataset);
        Self {
            registry,
            parser,
            predictor: PositionPredictor::new(config.earth_radius_km),
            analyzer: ConsistencyAnalyzer::new(&config),
            dataset,
            config,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    pub fn registry(&self) -> &VesselRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn metrics(&self) -> QueryMetrics {
        self.metrics.snapshot()
    }

    pub fn parse(&self, text: &str) -> ParsedQuery {
        self.parser.parse(text, &self.registry)
    }

    /// Parses and dispatches in one step.
    pub fn run(&self, text: &str) -> QueryReport {
        let parsed = self.parse(text);
        let outcome = self.dispatch(&parsed);
        QueryReport { parsed, outcome }
    }

    pub fn dispatch(&self, parsed: &ParsedQuery) -> QueryOutcome {
        let action = match parsed.intent {
            Intent::Show => Action::Show,
            Intent::Predict => Action::Predict {
                horizon_minutes: parsed
                    .time_horizon_minutes
                    .unwrap_or(self.config.default_predict_horizon_minutes),
            },
            Intent::Verify => Action::Verify,
            Intent::Unknown => {
                self.metrics.record_parse_failure();
                return QueryOutcome::Failed(QueryFailure {
                    stage: FailureStage::Parse,
                    message: format!("could not determine what to do with '{}'", parsed.text),
                });
            }
        };

        let Some(vessel) = parsed.vessel_name.as_deref() else {
            self.metrics.record_resolution_failure();
            let message = if parsed.candidates.is_empty() {
                "no vessel name found in query".to_string()
            } else {
                format!("no known vessel matches {:?}", parsed.candidates)
            };
            return QueryOutcome::Failed(QueryFailure {
                stage: FailureStage::Resolution,
                message,
            });
        };

        match self.answer(action, vessel) {
            Ok(outcome) => {
                self.metrics.record_answered();
                outcome
            }
            Err(err) => {
                self.logger.warn(&format!("query '{}' failed: {}", parsed.text, err));
                self.metrics.record_data_failure();
                QueryOutcome::Failed(QueryFailure::from_error(err))
            }
        }
    }

    fn answer(&self, action: Action, vessel: &str) -> CoreResult<QueryOutcome> {
        let tracks = TrackAccessor::new(&self.dataset);
        match action {
            Action::Show => Ok(QueryOutcome::Position(tracks.latest(vessel)?)),
            Action::Predict { horizon_minutes } => {
                let latest = tracks.latest(vessel)?;
                let prediction = self.predictor.predict_point(&latest, horizon_minutes);
                Ok(QueryOutcome::Prediction(prediction))
            }
            Action::Verify => {
                let recent = tracks.recent(vessel, self.analyzer.window())?;
                Ok(QueryOutcome::Verification(self.analyzer.verify(&recent)?))
            }
        }
    }
}
