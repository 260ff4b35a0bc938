//! Strategic analytics over a scored batch of answer signals.
//!
//! Deterministic reports (difficulty, opportunities, clusters, model
//! behaviour, timeline) are plain functions. Reports that want free-text
//! commentary take an [`InsightProvider`] and degrade to literal fallbacks
//! when it is slow or unavailable.

pub mod cache;
pub mod clusters;
pub mod context;
pub mod counts;
pub mod difficulty;
pub mod error;
pub mod gaps;
pub mod http;
pub mod insights;
pub mod model_behavior;
pub mod opportunities;
pub mod priority;
pub mod provider;
pub mod recommendations;
pub mod simulator;
mod text;
pub mod timeline;

use aivis_core::{AnswerSignal, ScoreBreakdown};
use serde::Serialize;

pub use cache::{
    normalize_query, CacheStats, CachingProvider, QueryCache, ResponseCache, DEFAULT_TTL_HOURS,
};
pub use clusters::{cluster_competitors, Cluster, ClusterReport};
pub use context::{AnalyticsSettings, BrandContext};
pub use counts::NamedCount;
pub use difficulty::{analyze_difficulty, DifficultyLevel, DifficultyReport, ScoredQuery};
pub use error::InsightError;
pub use gaps::{analyze_gaps, GapReason, GapReport, MissingTheme, ThemeGap};
pub use http::HttpInsightProvider;
pub use insights::{analyze_competitors, CompetitorInsight, CompetitorInsightsReport};
pub use model_behavior::{analyze_model_behavior, ModelBehaviorReport, ModelStats};
pub use opportunities::{detect_opportunities, Opportunity, OpportunityReport};
pub use priority::Priority;
pub use provider::{generate_or_fallback, InsightProvider, UnavailableProvider};
pub use recommendations::{generate_recommendations, Recommendation, RecommendationKind};
pub use simulator::{simulate_improvement, BrandChanges, ImpactEstimate, SimulationResult};
pub use timeline::{simulate_timeline, TimelineProjection};

/// Every analytics report for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsBundle {
    pub query_difficulty: DifficultyReport,
    pub gap_analysis: GapReport,
    pub competitor_insights: CompetitorInsightsReport,
    pub recommendations: Vec<Recommendation>,
    pub missed_opportunities: OpportunityReport,
    pub competitor_clusters: ClusterReport,
    pub model_behavior: ModelBehaviorReport,
    pub improvement_timeline: TimelineProjection,
}

/// Run the whole analytics suite over a scored batch.
///
/// Gap reasons and competitor insights are requested from `provider`
/// concurrently; everything else is computed locally.
pub async fn run_analytics<P: InsightProvider>(
    signals: &[AnswerSignal],
    score: &ScoreBreakdown,
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> AnalyticsBundle {
    let query_difficulty = analyze_difficulty(signals);
    let (gap_analysis, competitor_insights) = futures::join!(
        analyze_gaps(signals, context, provider, settings),
        analyze_competitors(signals, context, provider, settings),
    );
    let recommendations = generate_recommendations(
        signals,
        &query_difficulty,
        &gap_analysis,
        &competitor_insights,
    );
    let improvement_timeline = simulate_timeline(score.overall_score, &recommendations);

    tracing::info!(
        brand = %context.brand,
        answers = signals.len(),
        recommendations = recommendations.len(),
        projected_score = improvement_timeline.final_projected_score,
        "analytics complete"
    );

    AnalyticsBundle {
        missed_opportunities: detect_opportunities(signals, context),
        competitor_clusters: cluster_competitors(signals),
        model_behavior: analyze_model_behavior(signals, &context.brand),
        query_difficulty,
        gap_analysis,
        competitor_insights,
        recommendations,
        improvement_timeline,
    }
}
