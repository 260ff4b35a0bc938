//! Normalized string similarity on a 0–100 scale.

/// Indel similarity ratio between two strings, rounded to an integer in `0..=100`.
///
/// Computed as `100 * 2 * LCS(a, b) / (len(a) + len(b))` over Unicode scalar
/// values, where LCS is the longest common subsequence. Identical strings score
/// 100; two empty strings also score 100.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let lcs = lcs_len(&a, &b);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = ((200.0 * lcs as f64) / total as f64).round() as u32;
    score.min(100)
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("hellofresh", "hellofresh"), 100);
    }

    #[test]
    fn disjoint_strings_score_0() {
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn empty_against_non_empty_scores_0() {
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(ratio("", ""), 100);
    }

    #[test]
    fn single_typo_stays_above_threshold() {
        // "hellofresh" vs "hellofrsh": LCS 9, total 19 → 94.7 → 95
        assert_eq!(ratio("hellofresh", "hellofrsh"), 95);
    }

    #[test]
    fn trailing_punctuation_costs_little() {
        // LCS 10, total 21 → 95.2 → 95
        assert_eq!(ratio("hellofresh", "hellofresh,"), 95);
    }

    #[test]
    fn unrelated_words_fall_below_threshold() {
        assert!(ratio("hellofresh", "delivery") < 80);
    }
}
