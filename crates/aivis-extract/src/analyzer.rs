//! Per-answer extraction pipeline: mention, rank, competitors, sentiment.

use std::sync::Arc;

use aivis_core::{AnswerSignal, BrandIdentity, MatchType, RawAnswer};

use crate::competitors::extract_competitors;
use crate::entities::{EntityRecognizer, Unavailable};
use crate::mention::MentionDetector;
use crate::rank::extract_rank;
use crate::sentiment::classify_sentiment;

/// Brand-bound extractor turning answer text into [`AnswerSignal`]s.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Clone)]
pub struct Analyzer {
    brand: BrandIdentity,
    detector: MentionDetector,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("brand", &self.brand.canonical())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    #[must_use]
    pub fn new(brand: BrandIdentity) -> Self {
        let detector = MentionDetector::new(&brand);
        Self {
            brand,
            detector,
            recognizer: Arc::new(Unavailable),
        }
    }

    /// Replace the entity recognizer used for competitor recall.
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    #[must_use]
    pub fn brand(&self) -> &BrandIdentity {
        &self.brand
    }

    /// Extract signals from one answer text.
    ///
    /// `query`, `model` and `category` are left empty; use
    /// [`Analyzer::analyze_answer`] to carry them over from a [`RawAnswer`].
    #[must_use]
    pub fn analyze(&self, text: &str) -> AnswerSignal {
        if text.trim().is_empty() {
            return AnswerSignal::not_mentioned(text);
        }

        let mention = self.detector.detect(text);
        let brand_lower = self.brand.lowercase();

        let (rank, rank_context) = if mention.mentioned {
            let found = extract_rank(text, brand_lower);
            (found.rank, found.context)
        } else {
            (None, String::new())
        };

        let competitors = extract_competitors(text, &self.brand, self.recognizer.as_ref());
        let sentiment = classify_sentiment(text, &self.brand, mention.mentioned);

        let signal_confidence = if mention.mentioned {
            let ratio = match mention.match_type {
                MatchType::Exact => 1.0,
                MatchType::Fuzzy | MatchType::None => mention.confidence,
            };
            let rank_bonus = if rank.is_some() { 0.2 } else { 0.0 };
            (0.5 + 0.3 * ratio + rank_bonus).min(1.0)
        } else {
            0.0
        };

        AnswerSignal {
            query: String::new(),
            model: String::new(),
            category: None,
            mentioned: mention.mentioned,
            confidence: mention.confidence,
            match_type: mention.match_type,
            rank,
            rank_context,
            competitors,
            sentiment,
            sentiment_score: sentiment.score(),
            signal_confidence,
            response: text.to_string(),
            error: None,
        }
    }

    /// Extract signals from an answer record, keeping its query metadata.
    #[must_use]
    pub fn analyze_answer(&self, answer: &RawAnswer) -> AnswerSignal {
        let mut signal = self.analyze(&answer.response);
        signal.query.clone_from(&answer.query);
        signal.model.clone_from(&answer.model);
        signal.category.clone_from(&answer.category);
        signal.error.clone_from(&answer.error);

        tracing::debug!(
            brand = %self.brand.canonical(),
            model = %answer.model,
            mentioned = signal.mentioned,
            rank = ?signal.rank,
            competitors = signal.competitors.len(),
            "answer analyzed"
        );
        signal
    }

    #[must_use]
    pub fn analyze_batch(&self, answers: &[RawAnswer]) -> Vec<AnswerSignal> {
        answers.iter().map(|a| self.analyze_answer(a)).collect()
    }
}

/// One-shot extraction for callers that do not keep an [`Analyzer`] around.
#[must_use]
pub fn analyze(text: &str, brand: &BrandIdentity) -> AnswerSignal {
    Analyzer::new(brand.clone()).analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GazetteerRecognizer;
    use crate::rank::NOT_RANKED_CONTEXT;
    use aivis_core::Sentiment;

    fn brand(name: &str) -> BrandIdentity {
        BrandIdentity::new(name).unwrap()
    }

    #[test]
    fn exact_mention_has_full_detection_confidence() {
        let signal = analyze("I would pick HelloFresh.", &brand("HelloFresh"));
        assert!(signal.mentioned);
        assert_eq!(signal.match_type, MatchType::Exact);
        assert_eq!(signal.confidence, 1.0);
        assert_eq!(signal.rank, None);
        assert_eq!(signal.rank_context, NOT_RANKED_CONTEXT);
        assert!((signal.signal_confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn ranked_exact_mention_caps_signal_confidence() {
        let signal = analyze("1. Acme 2. Foo 3. Bar", &brand("Foo"));
        assert_eq!(signal.rank, Some(2));
        assert_eq!(signal.rank_context, "2. Foo");
        assert_eq!(signal.signal_confidence, 1.0);
    }

    #[test]
    fn fuzzy_mention_confidence_uses_ratio() {
        let signal = analyze("Try hellofrsh this week", &brand("HelloFresh"));
        assert_eq!(signal.match_type, MatchType::Fuzzy);
        assert!((signal.confidence - 0.95).abs() < 1e-9);
        assert!((signal.signal_confidence - (0.5 + 0.3 * 0.95)).abs() < 1e-9);
        assert_eq!(signal.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn no_mention_leaves_rank_empty() {
        let text = "1. Blue Apron\n2. Home Chef";
        let signal = analyze(text, &brand("HelloFresh"));
        assert!(!signal.mentioned);
        assert_eq!(signal.confidence, 0.0);
        assert_eq!(signal.rank, None);
        assert_eq!(signal.rank_context, "");
        assert_eq!(signal.sentiment, Sentiment::NotApplicable);
        assert_eq!(signal.signal_confidence, 0.0);
        assert!(signal.competitors.contains(&"Blue Apron".to_string()));
    }

    #[test]
    fn empty_text_returns_absent_defaults() {
        let signal = analyze("", &brand("HelloFresh"));
        assert_eq!(signal, AnswerSignal::not_mentioned(""));
    }

    #[test]
    fn analyze_is_idempotent() {
        let analyzer = Analyzer::new(brand("HelloFresh"));
        let text = "Top 3 meal kits:\n1. HelloFresh - great variety\n2. Blue Apron\n3. Home Chef";
        let first = serde_json::to_string(&analyzer.analyze(text)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(text)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn analyze_answer_carries_metadata() {
        let analyzer = Analyzer::new(brand("HelloFresh"));
        let answer = RawAnswer {
            query: "best meal kits".to_string(),
            model: "ChatGPT-4".to_string(),
            response: "HelloFresh is excellent.".to_string(),
            category: Some("Best-of".to_string()),
            error: None,
        };
        let signal = analyzer.analyze_answer(&answer);
        assert_eq!(signal.query, "best meal kits");
        assert_eq!(signal.model, "ChatGPT-4");
        assert_eq!(signal.category.as_deref(), Some("Best-of"));
        assert_eq!(signal.sentiment, Sentiment::Positive);
    }

    #[test]
    fn recognizer_adds_lowercase_competitors() {
        let analyzer = Analyzer::new(brand("HelloFresh"))
            .with_recognizer(Arc::new(GazetteerRecognizer::new(["EveryPlate"])));
        let signal = analyzer.analyze("hellofresh beats everyplate on variety");
        assert_eq!(signal.competitors, vec!["EveryPlate"]);
    }

    #[test]
    fn batch_preserves_order() {
        let analyzer = Analyzer::new(brand("HelloFresh"));
        let answers: Vec<RawAnswer> = ["a", "b"]
            .iter()
            .map(|q| RawAnswer {
                query: (*q).to_string(),
                model: "Claude".to_string(),
                response: "HelloFresh".to_string(),
                category: None,
                error: None,
            })
            .collect();
        let signals = analyzer.analyze_batch(&answers);
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].query, "a");
        assert_eq!(signals[1].query, "b");
    }
}
