//! Per-answer extraction records and the batch score they reduce to.

use serde::{Deserialize, Serialize};

/// One model answer as handed over by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub query: String,
    pub model: String,
    #[serde(default)]
    pub response: String,
    /// Intent category assigned when the query was generated.
    #[serde(default, alias = "intent_category")]
    pub category: Option<String>,
    /// Provider error, if the answer could not be obtained.
    #[serde(default)]
    pub error: Option<String>,
}

/// How the brand mention was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    None,
}

/// Tone of the text surrounding a brand mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Hesitant,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Sentiment {
    /// Numeric score in `[0.0, 1.0]` used by downstream aggregates.
    #[must_use]
    pub fn score(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Neutral | Sentiment::NotApplicable => 0.5,
            Sentiment::Hesitant => 0.3,
            Sentiment::Negative => 0.0,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Hesitant => write!(f, "Hesitant"),
            Sentiment::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Structured signals recovered from one (query, model) answer.
///
/// Built once by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSignal {
    pub query: String,
    pub model: String,
    pub category: Option<String>,
    pub mentioned: bool,
    /// Detection confidence: `1.0` for exact matches, the similarity ratio
    /// for fuzzy matches, `0.0` when the brand is absent.
    pub confidence: f64,
    pub match_type: MatchType,
    pub rank: Option<u32>,
    /// Literal text fragment that justified `rank`, or a marker such as
    /// `mentioned_not_ranked`.
    pub rank_context: String,
    pub competitors: Vec<String>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    /// Combined extraction confidence (mention strength plus rank evidence).
    pub signal_confidence: f64,
    pub response: String,
    pub error: Option<String>,
}

impl AnswerSignal {
    /// Signal for an answer with no detectable brand mention.
    #[must_use]
    pub fn not_mentioned(response: &str) -> Self {
        Self {
            query: String::new(),
            model: String::new(),
            category: None,
            mentioned: false,
            confidence: 0.0,
            match_type: MatchType::None,
            rank: None,
            rank_context: String::new(),
            competitors: Vec::new(),
            sentiment: Sentiment::NotApplicable,
            sentiment_score: Sentiment::NotApplicable.score(),
            signal_confidence: 0.0,
            response: response.to_string(),
            error: None,
        }
    }
}

/// Composite visibility score for a batch of answers.
///
/// `overall_score` is always the sum of the four components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall_score: f64,
    /// `[0, 40]`
    pub mention_rate: f64,
    /// `[0, 30]`
    pub rank_score: f64,
    /// `[0, 20]`
    pub competitor_dominance: f64,
    /// `[0, 10]`
    pub model_consistency: f64,
    pub mentions: usize,
    pub total_queries: usize,
    pub average_rank: Option<f64>,
}

impl ScoreBreakdown {
    /// All-zero breakdown for an empty batch.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            mention_rate: 0.0,
            rank_score: 0.0,
            competitor_dominance: 0.0,
            model_consistency: 0.0,
            mentions: 0,
            total_queries: 0,
            average_rank: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_score_table() {
        assert_eq!(Sentiment::Positive.score(), 1.0);
        assert_eq!(Sentiment::Neutral.score(), 0.5);
        assert_eq!(Sentiment::Hesitant.score(), 0.3);
        assert_eq!(Sentiment::Negative.score(), 0.0);
        assert_eq!(Sentiment::NotApplicable.score(), 0.5);
    }

    #[test]
    fn not_applicable_serializes_as_slash_form() {
        let json = serde_json::to_string(&Sentiment::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        assert_eq!(Sentiment::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn match_type_serializes_lowercase() {
        let json = serde_json::to_string(&MatchType::Fuzzy).unwrap();
        assert_eq!(json, "\"fuzzy\"");
    }

    #[test]
    fn raw_answer_accepts_intent_category_alias() {
        let raw: RawAnswer = serde_json::from_str(
            r#"{"query":"best meal kits","model":"ChatGPT-4","response":"...","intent_category":"Best-of"}"#,
        )
        .unwrap();
        assert_eq!(raw.category.as_deref(), Some("Best-of"));
        assert!(raw.error.is_none());
    }

    #[test]
    fn not_mentioned_signal_has_absent_defaults() {
        let signal = AnswerSignal::not_mentioned("");
        assert!(!signal.mentioned);
        assert_eq!(signal.confidence, 0.0);
        assert_eq!(signal.match_type, MatchType::None);
        assert!(signal.rank.is_none());
        assert!(signal.competitors.is_empty());
        assert_eq!(signal.sentiment, Sentiment::NotApplicable);
    }
}
