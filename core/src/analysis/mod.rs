pub mod consistency;
pub mod predictor;
pub mod router;
pub mod track;

pub use consistency::{
    AnomalyFlag, AnomalyKind, ConsistencyAnalyzer, ConsistencyStatus, VerificationResult,
};
pub use predictor::{Position, PositionPredictor, PredictionResult};
pub use router::{FailureStage, QueryFailure, QueryOutcome, QueryReport, QueryRouter};
pub use track::TrackAccessor;
