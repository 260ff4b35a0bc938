//! Visibility scoring over batches of [`aivis_core::AnswerSignal`]s.
//!
//! Scores are recomputed from scratch for every batch. Component values are
//! kept unrounded so `overall_score` is exactly their sum.

pub mod breakdown;
pub mod interpret;
pub mod scorer;

pub use breakdown::{
    category_breakdown, model_breakdown, top_competitors, CompetitorCount, OTHER_CATEGORY,
    UNKNOWN_MODEL,
};
pub use interpret::{interpret_score, VisibilityLevel};
pub use scorer::{average_rank, competitor_dominance, model_consistency, score};
