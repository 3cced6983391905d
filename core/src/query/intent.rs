use serde::{Deserialize, Serialize};

/// Operation a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Show,
    Predict,
    Verify,
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Intent::Show => "show",
            Intent::Predict => "predict",
            Intent::Verify => "verify",
            Intent::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

pub const VERIFY_KEYWORDS: &[&str] = &["check", "verify", "consistent", "anomal"];
pub const PREDICT_KEYWORDS: &[&str] = &["predict", "forecast", "will be", "after"];
pub const SHOW_KEYWORDS: &[&str] = &["where", "show", "latest", "current", "right now"];

/// Matches a lowercased query against a fixed vocabulary.
#[derive(Debug, Clone)]
pub enum IntentPredicate {
    /// Any keyword occurs as a substring.
    ContainsAny(&'static [&'static str]),
}

impl IntentPredicate {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            IntentPredicate::ContainsAny(keywords) => keywords.iter().any(|k| lowered.contains(k)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntentRule {
    pub predicate: IntentPredicate,
    pub intent: Intent,
}

/// Ordered rule list; the first rule whose predicate holds decides the intent.
#[derive(Debug, Clone)]
pub struct IntentRules {
    rules: Vec<IntentRule>,
}

impl IntentRules {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(&lowered))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unknown)
    }
}

impl Default for IntentRules {
    /// Verify outranks predict, which outranks show.
    fn default() -> Self {
        Self::new(vec![
            IntentRule {
                predicate: IntentPredicate::ContainsAny(VERIFY_KEYWORDS),
                intent: Intent::Verify,
            },
            IntentRule {
                predicate: IntentPredicate::ContainsAny(PREDICT_KEYWORDS),
                intent: Intent::Predict,
            },
            IntentRule {
                predicate: IntentPredicate::ContainsAny(SHOW_KEYWORDS),
                intent: Intent::Show,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_intent() {
        let rules = IntentRules::default();
        assert_eq!(rules.classify("Where is Titan right now?"), Intent::Show);
        assert_eq!(
            rules.classify("Predict where RAINBOW will be after 30 minutes"),
            Intent::Predict
        );
        assert_eq!(rules.classify("Is TITAN moving consistently?"), Intent::Verify);
        assert_eq!(rules.classify("Any anomalies for Rainbow?"), Intent::Verify);
        assert_eq!(rules.classify("Hello there"), Intent::Unknown);
    }

    #[test]
    fn verify_outranks_predict_and_show() {
        let rules = IntentRules::default();
        assert_eq!(rules.classify("Check if Titan will be consistent"), Intent::Verify);
        assert_eq!(rules.classify("Show whether RAINBOW is consistent"), Intent::Verify);
    }

    #[test]
    fn predict_outranks_show() {
        let rules = IntentRules::default();
        assert_eq!(rules.classify("Where will be TITAN in 2 hours?"), Intent::Predict);
    }

    #[test]
    fn custom_rule_order_changes_policy() {
        let rules = IntentRules::new(vec![IntentRule {
            predicate: IntentPredicate::ContainsAny(SHOW_KEYWORDS),
            intent: Intent::Show,
        }]);
        assert_eq!(rules.classify("Where will be TITAN"), Intent::Show);
        assert_eq!(rules.rules().len(), 1);
    }
}
