//! Brand mention detection: exact word-boundary matching, then fuzzy n-grams.

use aivis_core::{BrandIdentity, MatchType};
use regex::Regex;

use crate::similarity::ratio;

/// Minimum similarity ratio (0–100) for an n-gram to count as a fuzzy mention.
pub const FUZZY_THRESHOLD: u32 = 80;

/// Outcome of mention detection for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentionMatch {
    pub mentioned: bool,
    /// `1.0` for exact matches, `ratio / 100` for fuzzy matches, `0.0` otherwise.
    pub confidence: f64,
    pub match_type: MatchType,
}

impl MentionMatch {
    const NONE: Self = Self {
        mentioned: false,
        confidence: 0.0,
        match_type: MatchType::None,
    };
}

/// Detector bound to one brand, holding its compiled variation patterns.
#[derive(Debug, Clone)]
pub struct MentionDetector {
    brand_lower: String,
    word_count: usize,
    patterns: Vec<(String, Regex)>,
}

impl MentionDetector {
    #[must_use]
    pub fn new(brand: &BrandIdentity) -> Self {
        let patterns = brand
            .variations()
            .iter()
            .filter_map(|variant| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(variant));
                match Regex::new(&pattern) {
                    Ok(re) => Some((variant.clone(), re)),
                    Err(e) => {
                        tracing::warn!(variant = %variant, error = %e, "skipping unmatchable brand variation");
                        None
                    }
                }
            })
            .collect();

        Self {
            brand_lower: brand.lowercase().to_string(),
            word_count: brand.word_count(),
            patterns,
        }
    }

    /// Detect whether the brand is mentioned in `text`.
    ///
    /// Exact matches are tried first, one variation at a time in generation
    /// order. Only when none hits are sliding n-grams compared against the
    /// canonical name; the first n-gram at or above [`FUZZY_THRESHOLD`] wins.
    #[must_use]
    pub fn detect(&self, text: &str) -> MentionMatch {
        if text.trim().is_empty() {
            return MentionMatch::NONE;
        }

        let lower = text.to_lowercase();

        for (variant, re) in &self.patterns {
            if re.is_match(&lower) {
                tracing::debug!(variant = %variant, "exact brand match");
                return MentionMatch {
                    mentioned: true,
                    confidence: 1.0,
                    match_type: MatchType::Exact,
                };
            }
        }

        let words: Vec<&str> = lower.split_whitespace().collect();
        if self.word_count > words.len() {
            return MentionMatch::NONE;
        }

        for window in words.windows(self.word_count) {
            let phrase = window.join(" ");
            let score = ratio(&self.brand_lower, &phrase);
            if score >= FUZZY_THRESHOLD {
                tracing::debug!(phrase = %phrase, score, "fuzzy brand match");
                return MentionMatch {
                    mentioned: true,
                    confidence: f64::from(score) / 100.0,
                    match_type: MatchType::Fuzzy,
                };
            }
        }

        MentionMatch::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(name: &str) -> MentionDetector {
        MentionDetector::new(&BrandIdentity::new(name).unwrap())
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let m = detector("HelloFresh").detect("I really like HELLOFRESH for weeknights.");
        assert!(m.mentioned);
        assert_eq!(m.match_type, MatchType::Exact);
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn exact_match_respects_word_boundaries() {
        // "Factory" is not an exact hit for "Factor", though the fuzzy pass
        // still accepts it: LCS 6 over 14 chars → 86.
        let m = detector("Factor").detect("Visit the factory, tour included.");
        assert_eq!(m.match_type, MatchType::Fuzzy);
        assert!((m.confidence - 0.86).abs() < 1e-9);
    }

    #[test]
    fn space_removed_variation_matches() {
        let m = detector("Blue Apron").detect("Many people choose blueapron for dinner.");
        assert_eq!(m.match_type, MatchType::Exact);
    }

    #[test]
    fn suffix_stripped_variation_matches() {
        let m = detector("Acme Inc").detect("Acme makes the best anvils.");
        assert_eq!(m.match_type, MatchType::Exact);
    }

    #[test]
    fn typo_is_detected_as_fuzzy() {
        let m = detector("HelloFresh").detect("Try hellofrsh this week");
        assert!(m.mentioned);
        assert_eq!(m.match_type, MatchType::Fuzzy);
        assert!((m.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn multi_word_fuzzy_uses_bigrams() {
        let m = detector("Home Chef").detect("we loved home chief last month");
        assert!(m.mentioned);
        assert_eq!(m.match_type, MatchType::Fuzzy);
    }

    #[test]
    fn unrelated_text_is_not_a_mention() {
        let m = detector("HelloFresh").detect("Blue Apron and Home Chef are popular.");
        assert_eq!(m, MentionMatch::NONE);
    }

    #[test]
    fn empty_text_is_not_a_mention() {
        assert_eq!(detector("HelloFresh").detect(""), MentionMatch::NONE);
        assert_eq!(detector("HelloFresh").detect("   \n"), MentionMatch::NONE);
    }

    #[test]
    fn brand_longer_than_text_is_not_a_mention() {
        let m = detector("The Good Meal Company").detect("meals");
        assert!(!m.mentioned);
    }
}
