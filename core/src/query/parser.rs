use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::registry::VesselRegistry;
use crate::prelude::AnalysisConfig;
use crate::query::candidates::extract_candidates;
use crate::query::horizon::extract_horizon_minutes;
use crate::query::intent::{Intent, IntentRules};
use crate::query::resolver::NameResolver;

/// Structured interpretation of one free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub text: String,
    pub intent: Intent,
    pub vessel_name: Option<String>,
    pub time_horizon_minutes: Option<u32>,
    pub vessel_match_score: u8,
    pub candidates: Vec<String>,
}

/// Turns raw query text into a [`ParsedQuery`]. Never fails: unknown intent
/// and missing fields are ordinary results.
#[derive(Debug, Clone)]
pub struct QueryParser {
    rules: IntentRules,
    resolver: NameResolver,
}

impl QueryParser {
    pub fn new(rules: IntentRules, resolver: NameResolver) -> Self {
        Self { rules, resolver }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(IntentRules::default(), NameResolver::new(config.fuzzy_threshold))
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn parse(&self, text: &str, registry: &VesselRegistry) -> ParsedQuery {
        let intent = self.rules.classify(text);
        let candidates = extract_candidates(text);

        // First candidate that resolves wins, in discovery order.
        let resolved = candidates
            .iter()
            .map(|candidate| self.resolver.resolve(candidate, registry.all_names()))
            .find(|resolution| resolution.is_resolved());

        let (vessel_name, vessel_match_score) = match resolved {
            Some(resolution) => (resolution.best_match, resolution.score),
            None => (None, 0),
        };
        let time_horizon_minutes = extract_horizon_minutes(text);

        debug!(
            "parsed '{}': intent={} vessel={:?} score={} horizon={:?} candidates={:?}",
            text, intent, vessel_name, vessel_match_score, time_horizon_minutes, candidates
        );

        ParsedQuery {
            text: text.to_string(),
            intent,
            vessel_name,
            time_horizon_minutes,
            vessel_match_score,
            candidates,
        }
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}
