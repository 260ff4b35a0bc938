//! What-if prediction of the score after a set of brand changes.

use std::sync::LazyLock;

use aivis_core::AnswerSignal;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::{AnalyticsSettings, BrandContext};
use crate::priority::Priority;
use crate::provider::{generate_or_fallback, InsightProvider};
use crate::text::round1;

const DEFAULT_TAGLINE_SCORE: f64 = 6.5;
const TAGLINE_FALLBACK: &str = "New tagline provides moderate improvement in brand positioning.";
/// Past this total boost the combined changes overlap and pay off less.
const DIMINISHING_THRESHOLD: f64 = 15.0;
const DIMINISHING_FACTOR: f64 = 0.7;
const STAGE_FACTOR: f64 = 0.7;
const STAGES: &[&str] = &["Week 1-2", "Week 3-4", "Month 2", "Month 3"];
const GAP_THEME_COUNT: usize = 6;

static TAGLINE_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:/\s*10|out of 10)").expect("valid tagline score regex")
});

/// Proposed brand changes. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrandChanges {
    #[serde(alias = "new_tagline")]
    pub tagline: Option<String>,
    #[serde(alias = "new_features")]
    pub features: Vec<String>,
    #[serde(alias = "new_keywords")]
    pub keywords: Vec<String>,
    #[serde(alias = "page_updates")]
    pub pages: Vec<String>,
    pub pricing_strategy: Option<String>,
}

impl BrandChanges {
    fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn pricing_strategy(&self) -> Option<&str> {
        self.pricing_strategy.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Number of change kinds actually provided.
    #[must_use]
    pub fn provided_count(&self) -> usize {
        [
            self.tagline().is_some(),
            !self.features.is_empty(),
            !self.keywords.is_empty(),
            !self.pages.is_empty(),
            self.pricing_strategy().is_some(),
        ]
        .into_iter()
        .filter(|provided| *provided)
        .count()
    }
}

/// Non-mention queries touching each theme a change can address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeCounts {
    pub pricing: usize,
    pub features: usize,
    pub trust: usize,
    pub availability: usize,
    pub quality: usize,
    pub sustainability: usize,
}

const PRICING_TERMS: &[&str] = &["cheap", "affordable", "budget", "price"];
const FEATURE_TERMS: &[&str] = &["feature", "option", "variety"];
const TRUST_TERMS: &[&str] = &["trust", "review", "reliable", "popular"];
const AVAILABILITY_TERMS: &[&str] = &["delivery", "shipping", "fast", "available"];
const QUALITY_TERMS: &[&str] = &["best", "quality", "premium"];
const SUSTAINABILITY_TERMS: &[&str] = &["eco", "organic", "sustainable"];

#[must_use]
pub fn missing_theme_counts(signals: &[AnswerSignal]) -> ThemeCounts {
    let mut counts = ThemeCounts::default();
    for signal in signals.iter().filter(|s| !s.mentioned) {
        let query = signal.query.to_lowercase();
        let hit = |terms: &[&str]| usize::from(terms.iter().any(|t| query.contains(t)));
        counts.pricing += hit(PRICING_TERMS);
        counts.features += hit(FEATURE_TERMS);
        counts.trust += hit(TRUST_TERMS);
        counts.availability += hit(AVAILABILITY_TERMS);
        counts.quality += hit(QUALITY_TERMS);
        counts.sustainability += hit(SUSTAINABILITY_TERMS);
    }
    counts
}

/// Kinds of change, declared in the order they land on the staged timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ImprovementKind {
    #[serde(rename = "Tagline Update")]
    TaglineUpdate,
    #[serde(rename = "SEO Keywords")]
    SeoKeywords,
    #[serde(rename = "Content Pages")]
    ContentPages,
    #[serde(rename = "New Features")]
    NewFeatures,
    #[serde(rename = "Pricing Strategy")]
    PricingStrategy,
}

impl std::fmt::Display for ImprovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ImprovementKind::TaglineUpdate => "Tagline Update",
            ImprovementKind::SeoKeywords => "SEO Keywords",
            ImprovementKind::ContentPages => "Content Pages",
            ImprovementKind::NewFeatures => "New Features",
            ImprovementKind::PricingStrategy => "Pricing Strategy",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactEstimate {
    pub improvement_type: ImprovementKind,
    pub description: String,
    /// `[0, 10]`
    pub impact_score: f64,
    /// Score points this change is expected to add on its own.
    pub visibility_boost: f64,
    pub explanation: String,
    pub affected_queries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStage {
    pub timeframe: String,
    pub score: f64,
    pub changes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub current_score: f64,
    pub predicted_score: f64,
    pub improvement_delta: f64,
    /// `None` when the current score is zero.
    pub percentage_increase: Option<f64>,
    pub theme_counts: ThemeCounts,
    pub impact_breakdown: Vec<ImpactEstimate>,
    pub timeline: Vec<SimulationStage>,
    pub recommendations: Vec<String>,
    pub confidence: Priority,
}

/// First `N/10` or `N out of 10` rating in `text`.
#[must_use]
pub fn parse_tagline_score(text: &str) -> Option<f64> {
    TAGLINE_SCORE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `count * pct / 100`, rounded down.
fn share(count: usize, pct: usize) -> usize {
    count * pct / 100
}

async fn tagline_impact<P: InsightProvider>(
    tagline: &str,
    signals: &[AnswerSignal],
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> ImpactEstimate {
    let sample_queries = signals
        .iter()
        .take(5)
        .map(|s| format!("- {}", s.query))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!(
        "Analyze this new tagline for {brand} in the {industry} industry:\n\n\
         Tagline: \"{tagline}\"\n\n\
         Sample queries where brand currently struggles:\n{sample_queries}\n\n\
         Rate the effectiveness of this tagline on a scale of 1-10 for:\n\
         1. Addressing market gaps\n\
         2. Memorability\n\
         3. SEO value\n\
         4. Competitive differentiation\n\n\
         Provide overall impact score (1-10) and brief explanation (2 sentences).",
        brand = context.brand,
        industry = context.industry,
    );
    let analysis = generate_or_fallback(
        provider,
        &prompt,
        settings.insight_timeout,
        TAGLINE_FALLBACK.to_string(),
    )
    .await;
    let score = parse_tagline_score(&analysis)
        .map_or(DEFAULT_TAGLINE_SCORE, |s| s.clamp(0.0, 10.0));

    ImpactEstimate {
        improvement_type: ImprovementKind::TaglineUpdate,
        description: format!("New tagline: \"{tagline}\""),
        impact_score: score,
        visibility_boost: round1(score * 1.5),
        explanation: analysis,
        affected_queries: share(signals.len(), 30),
    }
}

#[allow(clippy::cast_precision_loss)]
fn features_impact(features: &[String], gaps: ThemeCounts, total: usize) -> ImpactEstimate {
    let score = (features.len() as f64 * 2.0 + gaps.features as f64 * 0.5).min(10.0);
    ImpactEstimate {
        improvement_type: ImprovementKind::NewFeatures,
        description: format!(
            "Adding {} new features: {}",
            features.len(),
            features.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        ),
        impact_score: round1(score),
        visibility_boost: round1(score * 1.2),
        explanation: format!(
            "New features address {} queries where brand lacked functionality. Expected to \
             improve feature-focused query performance.",
            gaps.features
        ),
        affected_queries: gaps.features + share(total, 15),
    }
}

#[allow(clippy::cast_precision_loss)]
fn keywords_impact(keywords: &[String], total: usize) -> ImpactEstimate {
    let score = (keywords.len() as f64 * 1.5).min(10.0);
    ImpactEstimate {
        improvement_type: ImprovementKind::SeoKeywords,
        description: format!(
            "Targeting {} new keywords: {}",
            keywords.len(),
            keywords.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        ),
        impact_score: round1(score),
        visibility_boost: round1(score * 2.0),
        explanation: "Strong SEO optimization. Keywords directly target queries where brand is \
                      absent. High potential for AI model indexing."
            .to_string(),
        affected_queries: share(total, 40),
    }
}

#[allow(clippy::cast_precision_loss)]
fn pages_impact(pages: &[String], total: usize) -> ImpactEstimate {
    let score = (pages.len() as f64 * 2.5).min(10.0);
    ImpactEstimate {
        improvement_type: ImprovementKind::ContentPages,
        description: format!(
            "Creating {} new pages: {}",
            pages.len(),
            pages.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
        ),
        impact_score: round1(score),
        visibility_boost: round1(score * 1.8),
        explanation: "New dedicated pages improve AI model awareness. Comparison and guide pages \
                      especially effective for visibility."
            .to_string(),
        affected_queries: share(total, 35),
    }
}

fn pricing_impact(strategy: &str, gaps: ThemeCounts) -> ImpactEstimate {
    let score = if gaps.pricing > 5 { 8.0 } else { 5.0 };
    ImpactEstimate {
        improvement_type: ImprovementKind::PricingStrategy,
        description: format!("New pricing: {strategy}"),
        impact_score: score,
        visibility_boost: round1(score * 1.3),
        explanation: format!(
            "Pricing is mentioned in {} non-mention queries. Strategy adjustment addresses this \
             gap directly.",
            gaps.pricing
        ),
        affected_queries: gaps.pricing,
    }
}

/// Score after applying every boost, with diminishing returns past the threshold.
#[must_use]
pub fn predict_score(current_score: f64, impacts: &[ImpactEstimate]) -> f64 {
    let total: f64 = impacts.iter().map(|i| i.visibility_boost).sum();
    let effective = if total > DIMINISHING_THRESHOLD {
        total * DIMINISHING_FACTOR
    } else {
        total
    };
    (current_score + effective).min(100.0)
}

fn staged_timeline(current_score: f64, impacts: &[ImpactEstimate]) -> Vec<SimulationStage> {
    let mut ordered: Vec<&ImpactEstimate> = impacts.iter().collect();
    ordered.sort_by_key(|i| i.improvement_type);

    let mut stages = vec![SimulationStage {
        timeframe: "Current".to_string(),
        score: round1(current_score),
        changes: "Baseline visibility".to_string(),
    }];
    let mut score = current_score;
    for (timeframe, impact) in STAGES.iter().zip(ordered) {
        score = (score + impact.visibility_boost * STAGE_FACTOR).min(100.0);
        stages.push(SimulationStage {
            timeframe: (*timeframe).to_string(),
            score: round1(score),
            changes: impact.improvement_type.to_string(),
        });
    }
    stages
}

fn top_recommendations(impacts: &[ImpactEstimate]) -> Vec<String> {
    let mut ordered: Vec<&ImpactEstimate> = impacts.iter().collect();
    ordered.sort_by(|a, b| b.visibility_boost.total_cmp(&a.visibility_boost));
    ordered
        .into_iter()
        .take(3)
        .map(|i| {
            format!(
                "Priority: {} - Expected +{}% visibility. {}",
                i.improvement_type,
                i.visibility_boost,
                i.explanation.chars().take(100).collect::<String>()
            )
        })
        .collect()
}

fn confidence(changes: &BrandChanges) -> Priority {
    #[allow(clippy::cast_precision_loss)]
    let coverage = changes.provided_count() as f64 / GAP_THEME_COUNT as f64;
    if coverage > 0.7 {
        Priority::High
    } else if coverage > 0.4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Predict the score after `changes`, starting from `current_score`.
///
/// Only the tagline rating consults the provider; everything else is
/// deterministic.
pub async fn simulate_improvement<P: InsightProvider>(
    signals: &[AnswerSignal],
    current_score: f64,
    changes: &BrandChanges,
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> SimulationResult {
    let gaps = missing_theme_counts(signals);
    let total = signals.len();

    let mut impacts = Vec::new();
    if let Some(tagline) = changes.tagline() {
        impacts.push(tagline_impact(tagline, signals, context, provider, settings).await);
    }
    if !changes.features.is_empty() {
        impacts.push(features_impact(&changes.features, gaps, total));
    }
    if !changes.keywords.is_empty() {
        impacts.push(keywords_impact(&changes.keywords, total));
    }
    if !changes.pages.is_empty() {
        impacts.push(pages_impact(&changes.pages, total));
    }
    if let Some(strategy) = changes.pricing_strategy() {
        impacts.push(pricing_impact(strategy, gaps));
    }

    let predicted = predict_score(current_score, &impacts);
    tracing::info!(
        brand = %context.brand,
        changes = impacts.len(),
        current_score,
        predicted_score = predicted,
        "improvement simulated"
    );

    SimulationResult {
        current_score: round1(current_score),
        predicted_score: round1(predicted),
        improvement_delta: round1(predicted - current_score),
        percentage_increase: (current_score > 0.0)
            .then(|| round1((predicted - current_score) / current_score * 100.0)),
        theme_counts: gaps,
        timeline: staged_timeline(current_score, &impacts),
        recommendations: top_recommendations(&impacts),
        confidence: confidence(changes),
        impact_breakdown: impacts,
    }
}
