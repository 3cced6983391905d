use std::sync::OnceLock;

use regex::Regex;

fn horizon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(minutes?|mins?|hours?|hrs?)\b")
            .unwrap_or_else(|err| panic!("invalid horizon pattern: {}", err))
    })
}

/// First "<number> <unit>" phrase in the text, in whole minutes.
///
/// Hours are converted and rounded to the nearest minute. Zero-length
/// horizons are treated as absent.
pub fn extract_horizon_minutes(text: &str) -> Option<u32> {
    let captures = horizon_pattern().captures(text)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_lowercase();

    let minutes = if unit.starts_with('h') {
        value * 60.0
    } else {
        value
    };
    let minutes = minutes.round();
    if minutes < 1.0 || minutes > u32::MAX as f64 {
        return None;
    }
    Some(minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_are_taken_verbatim() {
        assert_eq!(extract_horizon_minutes("after 30 minutes"), Some(30));
        assert_eq!(extract_horizon_minutes("in 45min"), Some(45));
        assert_eq!(extract_horizon_minutes("in 1 minute"), Some(1));
    }

    #[test]
    fn hours_convert_and_round() {
        assert_eq!(extract_horizon_minutes("in 2 hours"), Some(120));
        assert_eq!(extract_horizon_minutes("in 1.5 hrs"), Some(90));
        assert_eq!(extract_horizon_minutes("in 0.01 Hours"), Some(1));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extract_horizon_minutes("after 10 min or 2 hours"), Some(10));
    }

    #[test]
    fn absent_without_unit() {
        assert_eq!(extract_horizon_minutes("after 30"), None);
        assert_eq!(extract_horizon_minutes("where is titan"), None);
        assert_eq!(extract_horizon_minutes("after 0 minutes"), None);
    }
}
