use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::record::normalize_name;
use crate::math::similarity::token_sort_ratio;
use crate::prelude::{SimilarityScorer, FUZZY_THRESHOLD};

/// Outcome of resolving one candidate phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Accepted vessel name, absent when nothing cleared the threshold.
    pub best_match: Option<String>,
    /// 100 for exact hits; otherwise the best fuzzy score seen, even when
    /// it was rejected.
    pub score: u8,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.best_match.is_some()
    }
}

/// Maps free-text phrases onto known vessel names: exact match first, then
/// the highest fuzzy score at or above `threshold`.
#[derive(Clone)]
pub struct NameResolver {
    scorer: Arc<dyn SimilarityScorer>,
    threshold: u8,
}

impl NameResolver {
    pub fn new(threshold: u8) -> Self {
        Self::with_scorer(threshold, token_sort_ratio)
    }

    pub fn with_scorer<S>(threshold: u8, scorer: S) -> Self
    where
        S: SimilarityScorer + 'static,
    {
        Self {
            scorer: Arc::new(scorer),
            threshold,
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn resolve(&self, candidate: &str, known_names: &BTreeSet<String>) -> Resolution {
        let normalized = normalize_name(candidate);
        if normalized.is_empty() {
            return Resolution {
                best_match: None,
                score: 0,
            };
        }

        if known_names.contains(&normalized) {
            return Resolution {
                best_match: Some(normalized),
                score: 100,
            };
        }

        // BTreeSet iterates in lexicographic order, so keeping the first
        // maximum settles ties on the smallest name.
        let mut best: Option<(&String, u8)> = None;
        for known in known_names {
            let score = self.scorer.score(&normalized, known);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((known, score));
            }
        }

        match best {
            Some((name, score)) if score >= self.threshold => {
                debug!("fuzzy match '{}' -> '{}' ({})", candidate, name, score);
                Resolution {
                    best_match: Some(name.clone()),
                    score,
                }
            }
            Some((name, score)) => {
                debug!(
                    "fuzzy match '{}' rejected: best '{}' scored {} < {}",
                    candidate, name, score, self.threshold
                );
                Resolution {
                    best_match: None,
                    score,
                }
            }
            None => Resolution {
                best_match: None,
                score: 0,
            },
        }
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(FUZZY_THRESHOLD)
    }
}

impl std::fmt::Debug for NameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
