//! Vessel-name phrase extraction from raw query text.
//!
//! Three passes contribute candidates, in order: a rule-based proper-noun
//! recognizer, quoted substrings, then plain capitalized word runs. The
//! result keeps discovery order and drops repeats by normalized form.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::dataset::record::normalize_name;

/// Capitalized words that open or steer a query rather than name a ship.
const QUERY_VOCABULARY: &[&str] = &[
    "a", "after", "an", "and", "any", "are", "at", "be", "can", "check", "consistent", "current",
    "currently", "did", "do", "does", "for", "forecast", "from", "give", "has", "hour", "hours",
    "how", "i", "if", "in", "is", "it", "latest", "me", "minute", "minutes", "next", "now",
    "of", "on", "please", "position", "predict", "right", "ship", "show", "tell", "the", "to",
    "track", "verify", "vessel", "was", "what", "when", "where", "which", "will", "with", "you",
];

fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""([^"]+)"|“([^”]+)”|(?:^|\s)'([^']+)'"#)
            .unwrap_or_else(|err| panic!("invalid quote pattern: {}", err))
    })
}

fn capitalized_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Z][\w-]*(?:[ \t]+[A-Z][\w-]*)*")
            .unwrap_or_else(|err| panic!("invalid capitalized-run pattern: {}", err))
    })
}

fn is_query_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    QUERY_VOCABULARY.contains(&lowered.as_str())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Proper-noun runs: consecutive capitalized tokens (digits allowed once a
/// run has started) that are not query vocabulary. Sentence punctuation
/// attached to a token ends the run.
pub fn entity_phrases(text: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current: Vec<String> = Vec::new();

    let mut flush = |current: &mut Vec<String>| {
        if !current.is_empty() {
            phrases.push(current.join(" "));
            current.clear();
        }
    };

    for raw in text.split_whitespace() {
        let trimmed_start = raw.trim_start_matches(|c: char| !c.is_alphanumeric());
        let word = trimmed_start.trim_end_matches(|c: char| !c.is_alphanumeric());
        let breaks_after = word.len() < trimmed_start.len();
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("’s"))
            .unwrap_or(word);

        let qualifies = if word.is_empty() || is_query_word(word) {
            false
        } else if starts_uppercase(word) {
            true
        } else {
            !current.is_empty() && word.chars().all(|c| c.is_ascii_digit())
        };

        if qualifies {
            current.push(word.to_string());
        } else {
            flush(&mut current);
        }
        if breaks_after {
            flush(&mut current);
        }
    }
    flush(&mut current);
    phrases
}

/// Substrings enclosed in double, curly, or free-standing single quotes.
pub fn quoted_phrases(text: &str) -> Vec<String> {
    quoted_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Every run of capitalized words, query vocabulary included.
pub fn capitalized_runs(text: &str) -> Vec<String> {
    capitalized_run_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// All candidate phrases in discovery order, deduplicated by normalized form.
pub fn extract_candidates(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    entity_phrases(text)
        .into_iter()
        .chain(quoted_phrases(text))
        .chain(capitalized_runs(text))
        .filter(|candidate| {
            let key = normalize_name(candidate);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
