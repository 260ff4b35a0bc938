//! Keyword-window sentiment classifier for brand mentions.

use aivis_core::{BrandIdentity, Sentiment};

/// Characters of context kept on each side of the first brand occurrence.
pub const CONTEXT_WINDOW: usize = 200;

pub(crate) const POSITIVE_KEYWORDS: &[&str] = &[
    "best",
    "excellent",
    "great",
    "top",
    "recommended",
    "popular",
    "leading",
    "trusted",
    "quality",
    "favorite",
    "amazing",
    "outstanding",
    "perfect",
    "ideal",
];

pub(crate) const NEGATIVE_KEYWORDS: &[&str] = &[
    "however",
    "but",
    "expensive",
    "limited",
    "lacks",
    "poor",
    "disappointing",
    "avoid",
    "issue",
    "problem",
    "worst",
    "bad",
    "overpriced",
];

pub(crate) const HESITANT_KEYWORDS: &[&str] = &[
    "some",
    "might",
    "could",
    "may",
    "potentially",
    "sometimes",
    "depending",
    "mixed reviews",
    "varies",
    "uncertain",
];

/// Classify the tone around the brand's first appearance in `text`.
///
/// Keywords are counted by presence (substring) in the window, one hit per
/// keyword. Decision order: more negatives than positives is `Negative`;
/// otherwise two or more hesitant keywords is `Hesitant`; otherwise any
/// positive is `Positive`; else `Neutral`. Unmentioned brands are `N/A`.
#[must_use]
pub fn classify_sentiment(text: &str, brand: &BrandIdentity, mentioned: bool) -> Sentiment {
    if !mentioned {
        return Sentiment::NotApplicable;
    }

    let Some(window) = brand_window(text, brand) else {
        return Sentiment::Neutral;
    };

    let count = |keywords: &[&str]| keywords.iter().filter(|kw| window.contains(*kw)).count();
    let positive = count(POSITIVE_KEYWORDS);
    let negative = count(NEGATIVE_KEYWORDS);
    let hesitant = count(HESITANT_KEYWORDS);

    if negative > positive {
        Sentiment::Negative
    } else if hesitant >= 2 {
        Sentiment::Hesitant
    } else if positive > 0 {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// Lowercase text from `CONTEXT_WINDOW` chars before the first variation hit
/// to `CONTEXT_WINDOW` chars past the end of the canonical name.
fn brand_window(text: &str, brand: &BrandIdentity) -> Option<String> {
    let lower = text.to_lowercase();
    let byte_idx = brand
        .variations()
        .iter()
        .find_map(|variant| lower.find(variant.as_str()))?;

    let char_idx = lower[..byte_idx].chars().count();
    let start = char_idx.saturating_sub(CONTEXT_WINDOW);
    let end = char_idx + brand.canonical().chars().count() + CONTEXT_WINDOW;

    Some(lower.chars().skip(start).take(end - start).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand() -> BrandIdentity {
        BrandIdentity::new("HelloFresh").unwrap()
    }

    #[test]
    fn unmentioned_is_not_applicable() {
        assert_eq!(
            classify_sentiment("HelloFresh is great", &brand(), false),
            Sentiment::NotApplicable
        );
    }

    #[test]
    fn positive_keyword_returns_positive() {
        let s = classify_sentiment("HelloFresh is an excellent choice.", &brand(), true);
        assert_eq!(s, Sentiment::Positive);
    }

    #[test]
    fn negatives_outweighing_positives_return_negative() {
        let text = "HelloFresh is popular, but it is expensive and the portions are limited.";
        assert_eq!(classify_sentiment(text, &brand(), true), Sentiment::Negative);
    }

    #[test]
    fn two_hesitant_keywords_return_hesitant() {
        let text = "HelloFresh might work for you, depending on your schedule.";
        assert_eq!(classify_sentiment(text, &brand(), true), Sentiment::Hesitant);
    }

    #[test]
    fn hesitancy_beats_positive_when_negatives_do_not_dominate() {
        let text = "HelloFresh could be the best option, depending on budget.";
        assert_eq!(classify_sentiment(text, &brand(), true), Sentiment::Hesitant);
    }

    #[test]
    fn no_keywords_returns_neutral() {
        let text = "HelloFresh ships boxes on Tuesdays.";
        assert_eq!(classify_sentiment(text, &brand(), true), Sentiment::Neutral);
    }

    #[test]
    fn keywords_outside_window_are_ignored() {
        let padding = "x".repeat(400);
        let text = format!("excellent {padding} HelloFresh ships boxes.");
        assert_eq!(classify_sentiment(&text, &brand(), true), Sentiment::Neutral);
    }

    #[test]
    fn fuzzy_only_mention_falls_back_to_neutral() {
        // The brand was detected by similarity, so no variation occurs verbatim.
        let text = "hellofrsh is excellent";
        assert_eq!(classify_sentiment(text, &brand(), true), Sentiment::Neutral);
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = format!("{} HelloFresh – great “value” {}", "é".repeat(300), "ü".repeat(300));
        assert_eq!(classify_sentiment(&text, &brand(), true), Sentiment::Positive);
    }
}
