//! String similarity metrics used for vessel-name matching.

/// Lowercases and replaces every non-alphanumeric character with a space,
/// collapsing the result to single-space-separated tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Length of the longest common subsequence of two character slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Normalized indel similarity in percent: `2 * lcs / (len_a + len_b)`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Token-order-insensitive similarity: both sides are tokenized, the tokens
/// sorted and rejoined, then compared with [`ratio`]. Rounded to 0..=100.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let mut left = tokenize(a);
    let mut right = tokenize(b);
    if left.is_empty() || right.is_empty() {
        return 0;
    }
    left.sort();
    right.sort();
    ratio(&left.join(" "), &right.join(" ")).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_sort_ignores_order_and_punctuation() {
        assert_eq!(token_sort_ratio("Lucid Ever", "EVER LUCID"), 100);
        assert_eq!(token_sort_ratio("ever-lucid", "EVER LUCID"), 100);
    }

    #[test]
    fn token_sort_tolerates_typos() {
        // "ever lucd" vs "ever lucid": lcs 9 over 19 characters
        assert_eq!(token_sort_ratio("Ever Lucd", "EVER LUCID"), 95);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(token_sort_ratio("", "TITAN"), 0);
        assert_eq!(token_sort_ratio("?!", "TITAN"), 0);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(token_sort_ratio("Ever-Given", "NORDIC STAR") < 75);
        assert!(token_sort_ratio("Ever-Given", "TITAN") < 75);
    }
}
