use serde::{Deserialize, Serialize};
use vesselcore::analysis::QueryReport;

/// Body accepted by `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

/// Most recent answer kept for `GET /latest`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeModel {
    pub last_report: Option<QueryReport>,
    pub queries_served: usize,
}
