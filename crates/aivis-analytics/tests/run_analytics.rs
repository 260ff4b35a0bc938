//! End-to-end analytics over a small extracted and scored batch.

use aivis_analytics::{
    run_analytics, AnalyticsSettings, BrandContext, InsightError, InsightProvider,
    RecommendationKind, UnavailableProvider,
};
use aivis_core::{AnswerSignal, BrandIdentity, RawAnswer};
use aivis_extract::Analyzer;

struct CannedProvider;

impl InsightProvider for CannedProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        Ok("Wins on trusted premium quality and strong SEO.".to_string())
    }
}

fn raw(query: &str, model: &str, response: &str) -> RawAnswer {
    RawAnswer {
        query: query.to_string(),
        model: model.to_string(),
        response: response.to_string(),
        category: Some("Discovery".to_string()),
        error: None,
    }
}

fn batch() -> Vec<AnswerSignal> {
    let brand = BrandIdentity::new("HelloFresh").expect("valid brand");
    let analyzer = Analyzer::new(brand);
    analyzer.analyze_batch(&[
        raw(
            "best meal kit delivery services",
            "ChatGPT",
            "1. HelloFresh - huge menu\n2. Blue Apron - classic recipes\n3. Home Chef - flexible",
        ),
        raw(
            "cheap meal kits for families",
            "Claude",
            "1. EveryPlate - lowest prices\n2. Dinnerly - budget friendly",
        ),
        raw(
            "organic meal kits",
            "Gemini",
            "1. Green Chef - certified organic\n2. Sunbasket - clean ingredients",
        ),
    ])
}

#[tokio::test]
async fn unavailable_provider_produces_complete_bundle() {
    let signals = batch();
    let score = aivis_scoring::score(&signals);
    let context = BrandContext::new("HelloFresh", "Meal Kit");

    let bundle = run_analytics(
        &signals,
        &score,
        &context,
        &UnavailableProvider,
        &AnalyticsSettings::default(),
    )
    .await;

    assert_eq!(bundle.query_difficulty.scored_queries.len(), 3);
    assert_eq!(bundle.gap_analysis.total_non_mentions, 2);
    for reason in &bundle.gap_analysis.reasons {
        assert_eq!(
            reason.reason,
            "Competitors dominated this query category. HelloFresh may lack visibility or relevant positioning."
        );
    }

    let kinds: Vec<RecommendationKind> =
        bundle.recommendations.iter().map(|r| r.category).collect();
    assert!(kinds.contains(&RecommendationKind::SeoOptimization));
    assert_eq!(kinds.last(), Some(&RecommendationKind::TrustBuilding));

    assert_eq!(bundle.model_behavior.model_statistics.len(), 3);
    assert_eq!(
        bundle.improvement_timeline.estimated_duration_months,
        bundle.recommendations.len().min(5)
    );
    assert!(bundle.improvement_timeline.final_projected_score <= 100.0);

    let json = serde_json::to_value(&bundle).expect("bundle serializes");
    assert!(json.get("improvement_timeline").is_some());
    assert!(json.get("competitor_clusters").is_some());
}

#[tokio::test]
async fn provider_text_flows_into_competitor_insights() {
    let signals = batch();
    let score = aivis_scoring::score(&signals);
    let context = BrandContext::new("HelloFresh", "Meal Kit");

    let bundle = run_analytics(
        &signals,
        &score,
        &context,
        &CannedProvider,
        &AnalyticsSettings::default(),
    )
    .await;

    assert!(!bundle.competitor_insights.insights.is_empty());
    for insight in &bundle.competitor_insights.insights {
        assert_eq!(
            insight.strategic_insight,
            "Wins on trusted premium quality and strong SEO."
        );
    }
}

#[tokio::test]
async fn empty_batch_still_yields_baseline_reports() {
    let score = aivis_scoring::score(&[]);
    let context = BrandContext::new("HelloFresh", "Meal Kit");

    let bundle = run_analytics(
        &[],
        &score,
        &context,
        &UnavailableProvider,
        &AnalyticsSettings::default(),
    )
    .await;

    assert!(bundle.query_difficulty.scored_queries.is_empty());
    assert_eq!(bundle.missed_opportunities.total_opportunities, 0);
    assert_eq!(
        bundle.recommendations.last().map(|r| r.category),
        Some(RecommendationKind::TrustBuilding)
    );
    assert!(bundle.improvement_timeline.timeline[0].score.abs() < f64::EPSILON);
}
