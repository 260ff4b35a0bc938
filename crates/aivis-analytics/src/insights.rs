//! Why competitors get recommended: per-competitor strategy insights.

use aivis_core::AnswerSignal;
use aivis_extract::numbered_rank;
use futures::future::join_all;
use serde::Serialize;

use crate::context::{AnalyticsSettings, BrandContext};
use crate::counts::{ranked_counts, NamedCount};
use crate::provider::{generate_or_fallback, InsightProvider};
use crate::text::round1;

const DOMINANCE_AREAS: &[(&str, &[&str])] = &[
    (
        "Budget/Affordability",
        &["cheap", "affordable", "budget", "low cost", "inexpensive"],
    ),
    (
        "Quality/Premium",
        &["best", "premium", "luxury", "high-quality", "top"],
    ),
    (
        "Features/Variety",
        &["feature", "option", "variety", "customizable"],
    ),
    (
        "Speed/Delivery",
        &["fast", "quick", "delivery", "shipping", "express"],
    ),
    (
        "Trust/Authority",
        &["trusted", "reliable", "review", "rating", "popular"],
    ),
    (
        "Sustainability",
        &["eco", "organic", "sustainable", "green", "natural"],
    ),
    ("Convenience", &["easy", "convenient", "simple", "hassle-free"]),
];
const GENERAL_PRESENCE: &str = "General Market Presence";

const STRENGTHS: &[(&str, &[&str])] = &[
    ("Pricing", &["price", "affordable", "budget", "cheap", "cost"]),
    ("Quality", &["quality", "premium", "best", "excellent"]),
    ("Features", &["feature", "option", "variety", "selection"]),
    (
        "Trust",
        &["trust", "reliable", "reputation", "review", "popular"],
    ),
    (
        "Innovation",
        &["innovative", "technology", "modern", "advanced"],
    ),
    ("Service", &["service", "support", "customer", "experience"]),
    (
        "Availability",
        &["available", "accessible", "coverage", "delivery"],
    ),
];
const DEFAULT_STRENGTH: &str = "Brand Authority";

const PATTERN_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorInsight {
    pub competitor_name: String,
    pub mention_count: usize,
    pub strategic_insight: String,
    pub dominance_areas: Vec<String>,
    /// Top five intent categories of the queries naming this competitor.
    pub category_distribution: Vec<NamedCount>,
    /// Mean numbered-list position of the competitor, where recoverable.
    pub average_rank: Option<f64>,
    pub key_strength: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DominancePatterns {
    pub most_competitive_areas: Vec<NamedCount>,
    pub common_strengths: Vec<NamedCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorInsightsReport {
    pub total_competitors: usize,
    pub top_competitors_analyzed: usize,
    pub insights: Vec<CompetitorInsight>,
    pub dominance_patterns: DominancePatterns,
    pub strategic_summary: String,
}

/// Answers naming each competitor, in first-seen competitor order.
fn mentions_by_competitor(signals: &[AnswerSignal]) -> Vec<(&str, Vec<&AnswerSignal>)> {
    let mut mentions: Vec<(&str, Vec<&AnswerSignal>)> = Vec::new();
    for signal in signals {
        for competitor in &signal.competitors {
            match mentions.iter_mut().find(|(name, _)| *name == competitor.as_str()) {
                Some((_, list)) => list.push(signal),
                None => mentions.push((competitor.as_str(), vec![signal])),
            }
        }
    }
    mentions
}

/// Areas a competitor dominates, judged from the queries that named it.
#[must_use]
pub fn dominance_areas(queries: &[&str]) -> Vec<String> {
    let joined = queries
        .iter()
        .map(|q| q.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let areas: Vec<String> = DOMINANCE_AREAS
        .iter()
        .filter(|(_, terms)| terms.iter().any(|t| joined.contains(t)))
        .map(|(area, _)| (*area).to_string())
        .collect();
    if areas.is_empty() {
        vec![GENERAL_PRESENCE.to_string()]
    } else {
        areas
    }
}

/// First strength whose keywords occur in the insight text.
#[must_use]
pub fn key_strength(insight: &str) -> String {
    let lower = insight.to_lowercase();
    STRENGTHS
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| lower.contains(t)))
        .map_or(DEFAULT_STRENGTH, |(name, _)| name)
        .to_string()
}

pub async fn analyze_competitors<P: InsightProvider>(
    signals: &[AnswerSignal],
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> CompetitorInsightsReport {
    let mut mentions = mentions_by_competitor(signals);
    let total_competitors = mentions.len();

    if mentions.is_empty() {
        return CompetitorInsightsReport {
            total_competitors: 0,
            top_competitors_analyzed: 0,
            insights: Vec::new(),
            dominance_patterns: DominancePatterns {
                most_competitive_areas: Vec::new(),
                common_strengths: Vec::new(),
            },
            strategic_summary: "No competitors detected in responses.".to_string(),
        };
    }

    // Stable: equal counts keep first-seen order.
    mentions.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    mentions.truncate(settings.max_competitor_insights);

    let insights = join_all(
        mentions
            .iter()
            .map(|(name, answers)| competitor_insight(name, answers, context, provider, settings)),
    )
    .await;

    let dominance_patterns = DominancePatterns {
        most_competitive_areas: ranked_counts(insights.iter().flat_map(|i| i.dominance_areas.iter()))
            .into_iter()
            .take(PATTERN_LIMIT)
            .collect(),
        common_strengths: ranked_counts(insights.iter().map(|i| i.key_strength.as_str()))
            .into_iter()
            .take(PATTERN_LIMIT)
            .collect(),
    };
    let strategic_summary = summarize(&context.brand, &insights, &dominance_patterns);

    tracing::debug!(
        brand = %context.brand,
        total_competitors,
        analyzed = insights.len(),
        "competitor insights complete"
    );

    CompetitorInsightsReport {
        total_competitors,
        top_competitors_analyzed: insights.len(),
        insights,
        dominance_patterns,
        strategic_summary,
    }
}

async fn competitor_insight<P: InsightProvider>(
    competitor: &str,
    answers: &[&AnswerSignal],
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> CompetitorInsight {
    let queries: Vec<&str> = answers.iter().map(|a| a.query.as_str()).collect();
    let sample_queries = queries
        .iter()
        .take(5)
        .map(|q| format!("- {q}"))
        .collect::<Vec<_>>()
        .join("\n");
    let sample_responses = answers
        .iter()
        .take(3)
        .map(|a| a.response.chars().take(300).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "Analyze why \"{competitor}\" is frequently recommended in the {industry} industry.\n\n\
         Sample queries where {competitor} appeared:\n{sample_queries}\n\n\
         Sample AI responses:\n{sample_responses}\n\n\
         Identify the KEY strategic advantages that make {competitor} stand out. Focus on:\n\
         1. Brand positioning (price, quality, niche)\n\
         2. Specific strengths (features, trust signals, SEO)\n\
         3. Market advantages\n\n\
         Provide 2-3 concise strategic insights. Be specific and actionable.",
        industry = context.industry,
    );
    let fallback = format!(
        "{competitor} appears frequently in {} queries, suggesting strong market presence and brand recognition.",
        answers.len()
    );
    let strategic_insight =
        generate_or_fallback(provider, &prompt, settings.insight_timeout, fallback).await;

    let category_distribution = ranked_counts(answers.iter().filter_map(|a| a.category.as_deref()))
        .into_iter()
        .take(PATTERN_LIMIT)
        .collect();

    let ranks: Vec<f64> = answers
        .iter()
        .filter_map(|a| numbered_rank(&a.response, competitor))
        .map(|(rank, _)| f64::from(rank))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let average_rank = (!ranks.is_empty()).then(|| round1(ranks.iter().sum::<f64>() / ranks.len() as f64));

    CompetitorInsight {
        competitor_name: competitor.to_string(),
        mention_count: answers.len(),
        key_strength: key_strength(&strategic_insight),
        strategic_insight,
        dominance_areas: dominance_areas(&queries),
        category_distribution,
        average_rank,
    }
}

fn summarize(brand: &str, insights: &[CompetitorInsight], patterns: &DominancePatterns) -> String {
    let Some(top) = insights.first() else {
        return "No competitive insights available.".to_string();
    };
    let top_areas = top
        .dominance_areas
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let area = patterns
        .most_competitive_areas
        .first()
        .map_or("general market", |a| a.name.as_str());

    format!(
        "{} leads with {} mentions, dominating {top_areas}. The most competitive area is {area}. \
         {brand} needs to differentiate in less saturated segments or outcompete in {area}.",
        top.competitor_name, top.mention_count
    )
}
