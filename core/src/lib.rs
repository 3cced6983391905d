//! Natural-language query core for AIS vessel tracks.
//!
//! Free-text questions are parsed into an intent, a resolved vessel name and
//! an optional horizon, then routed to latest-position lookup, great-circle
//! prediction, or movement-consistency checks over an immutable snapshot.

pub mod analysis;
pub mod dataset;
pub mod math;
pub mod prelude;
pub mod query;
pub mod telemetry;

pub use analysis::{QueryOutcome, QueryReport, QueryRouter};
pub use dataset::{TrackDataset, VesselRegistry};
pub use prelude::{AnalysisConfig, CoreError, CoreResult};
pub use query::{Intent, ParsedQuery, QueryParser};
