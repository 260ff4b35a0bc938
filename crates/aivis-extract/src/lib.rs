//! Heuristic signal extraction from free-text model answers.
//!
//! Given an answer and a [`aivis_core::BrandIdentity`], the [`Analyzer`]
//! decides whether the brand is mentioned, recovers its rank, lists the
//! competitors named alongside it and classifies the tone of the mention.
//! Extraction never fails: degenerate input yields the "not mentioned"
//! defaults.

pub mod analyzer;
pub mod competitors;
pub mod entities;
pub mod mention;
pub mod rank;
pub mod sentiment;
pub mod similarity;

pub use analyzer::{analyze, Analyzer};
pub use competitors::{extract_competitors, MAX_COMPETITORS};
pub use entities::{EntityRecognizer, GazetteerRecognizer, Unavailable};
pub use mention::{MentionDetector, MentionMatch, FUZZY_THRESHOLD};
pub use rank::{
    extract_rank, numbered_items, numbered_rank, ListItem, RankMatch, NOT_RANKED_CONTEXT,
    TOP_SECTION_CONTEXT,
};
pub use sentiment::classify_sentiment;
pub use similarity::ratio;
