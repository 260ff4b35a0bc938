//! Rule-based, priority-ordered recommendations.

use aivis_core::AnswerSignal;
use serde::Serialize;

use crate::difficulty::DifficultyReport;
use crate::gaps::GapReport;
use crate::insights::CompetitorInsightsReport;
use crate::priority::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    #[serde(rename = "Quick Wins")]
    QuickWins,
    #[serde(rename = "Content Gap")]
    ContentGap,
    #[serde(rename = "Competitive Strategy")]
    CompetitiveStrategy,
    #[serde(rename = "SEO Optimization")]
    SeoOptimization,
    #[serde(rename = "Trust Building")]
    TrustBuilding,
}

/// Fixed annotation attached to every recommendation of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub priority: Priority,
    pub effort: Priority,
    pub timeframe: &'static str,
    pub expected_impact: &'static str,
}

impl RecommendationKind {
    #[must_use]
    pub fn annotation(self) -> Annotation {
        let (priority, effort, timeframe, expected_impact) = match self {
            RecommendationKind::QuickWins => (
                Priority::High,
                Priority::Low,
                "1-2 weeks",
                "+15-25% visibility in these segments",
            ),
            RecommendationKind::ContentGap => (
                Priority::High,
                Priority::Medium,
                "2-4 weeks",
                "+10-20% visibility",
            ),
            RecommendationKind::CompetitiveStrategy => (
                Priority::Medium,
                Priority::High,
                "1-2 months",
                "+10-15% visibility",
            ),
            RecommendationKind::SeoOptimization => (
                Priority::High,
                Priority::Medium,
                "3-4 weeks",
                "+20-30% overall visibility",
            ),
            RecommendationKind::TrustBuilding => (
                Priority::Medium,
                Priority::High,
                "1-3 months",
                "+10-15% visibility, especially on Claude and Gemini",
            ),
        };
        Annotation {
            priority,
            effort,
            timeframe,
            expected_impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: RecommendationKind,
    pub action: String,
    pub details: String,
    pub expected_impact: String,
    pub effort: Priority,
    pub timeframe: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, action: String, details: String) -> Self {
        let note = kind.annotation();
        Self {
            priority: note.priority,
            category: kind,
            action,
            details,
            expected_impact: note.expected_impact.to_string(),
            effort: note.effort,
            timeframe: note.timeframe.to_string(),
        }
    }
}

/// Build recommendations in fixed order: quick wins, content gap,
/// competitive strategy, SEO (when most answers miss the brand), trust.
#[must_use]
pub fn generate_recommendations(
    signals: &[AnswerSignal],
    difficulty: &DifficultyReport,
    gaps: &GapReport,
    competitors: &CompetitorInsightsReport,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(5);

    if !difficulty.easy_opportunities.is_empty() {
        let examples = difficulty
            .easy_opportunities
            .iter()
            .take(3)
            .map(|q| q.query.chars().take(40).collect::<String>())
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(Recommendation::new(
            RecommendationKind::QuickWins,
            format!(
                "Create targeted content for {} low-competition queries",
                difficulty.easy_opportunities_count
            ),
            format!("Examples: {examples}..."),
        ));
    }

    if let Some(top) = gaps.top_missing_themes.first() {
        recommendations.push(Recommendation::new(
            RecommendationKind::ContentGap,
            format!("Create '{}' focused landing pages", top.theme),
            format!(
                "Competitors emphasize {} in {} queries where you're absent. Add 3-5 pages highlighting this aspect.",
                top.theme, top.frequency
            ),
        ));
    }

    if let Some(top) = competitors.insights.first() {
        recommendations.push(Recommendation::new(
            RecommendationKind::CompetitiveStrategy,
            format!("Adopt {}'s positioning strategy", top.competitor_name),
            top.strategic_insight.chars().take(150).collect(),
        ));
    }

    let non_mentions = signals.iter().filter(|s| !s.mentioned).count();
    if non_mentions * 2 > signals.len() {
        recommendations.push(Recommendation::new(
            RecommendationKind::SeoOptimization,
            "Implement AI-specific SEO best practices".to_string(),
            "Add structured data, FAQ schema, comparison tables, and customer testimonials. \
             AI models heavily weight these signals."
                .to_string(),
        ));
    }

    recommendations.push(Recommendation::new(
        RecommendationKind::TrustBuilding,
        "Increase trust signals and third-party validation".to_string(),
        "Get featured in industry publications, add a customer reviews widget, and showcase \
         partnerships and certifications prominently."
            .to_string(),
    ));

    recommendations
}
