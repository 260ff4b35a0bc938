//! Why the brand was absent: theme gaps in answers that skipped it.

use aivis_core::AnswerSignal;
use futures::future::join_all;
use serde::Serialize;

use crate::context::{AnalyticsSettings, BrandContext};
use crate::priority::Priority;
use crate::provider::{generate_or_fallback, InsightProvider};
use crate::text::{char_window, percent};

/// Topics scanned for in answers where the brand was absent, in report order.
pub const GAP_THEMES: &[&str] = &[
    "pricing",
    "affordability",
    "budget",
    "quality",
    "premium",
    "luxury",
    "availability",
    "shipping",
    "delivery",
    "features",
    "functionality",
    "options",
    "reviews",
    "ratings",
    "trust",
    "reputation",
    "sustainability",
    "eco-friendly",
    "organic",
    "convenience",
    "ease-of-use",
    "simple",
    "variety",
    "selection",
    "choice",
    "customer service",
    "support",
    "warranty",
    "innovation",
    "technology",
    "modern",
];

/// Query intent groups with their trigger terms; first match wins.
const QUERY_GROUPS: &[(&str, &[&str])] = &[
    (
        "Price/Budget",
        &["cheap", "affordable", "budget", "cost", "price", "inexpensive"],
    ),
    (
        "Quality/Premium",
        &["best", "quality", "premium", "luxury", "top", "high-end"],
    ),
    (
        "Delivery/Speed",
        &["fast", "delivery", "shipping", "quick", "express"],
    ),
    (
        "Features/Options",
        &["feature", "option", "variety", "selection", "choice"],
    ),
    (
        "Reviews/Trust",
        &["review", "rating", "trusted", "reliable", "popular"],
    ),
    (
        "Sustainability",
        &["eco", "organic", "sustainable", "green", "natural"],
    ),
    ("Convenience", &["easy", "convenient", "simple", "hassle-free"]),
];
const GENERAL_GROUP: &str = "General";

const CONTEXT_CHARS: usize = 100;
const MAX_EXAMPLES: usize = 3;
const TOP_THEMES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeExample {
    pub query: String,
    pub competitors: Vec<String>,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeGap {
    pub theme: String,
    /// Non-mention answers whose text raised the theme.
    pub frequency: usize,
    /// `frequency` as a share of non-mention answers.
    pub percentage: f64,
    pub examples: Vec<ThemeExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTheme {
    pub theme: String,
    pub frequency: usize,
    pub impact: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapReason {
    pub query_category: String,
    pub query_count: usize,
    pub reason: String,
    pub sample_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapReport {
    pub total_non_mentions: usize,
    pub total_queries: usize,
    pub non_mention_rate: f64,
    pub reasons: Vec<GapReason>,
    /// Sorted by frequency, ties in [`GAP_THEMES`] order.
    pub theme_gaps: Vec<ThemeGap>,
    pub top_missing_themes: Vec<MissingTheme>,
    pub summary: String,
}

impl GapReport {
    fn all_mentioned(brand: &str, total_queries: usize) -> Self {
        Self {
            total_non_mentions: 0,
            total_queries,
            non_mention_rate: 0.0,
            reasons: Vec::new(),
            theme_gaps: Vec::new(),
            top_missing_themes: Vec::new(),
            summary: format!("{brand} was mentioned in all queries!"),
        }
    }
}

/// Themes raised in answers where the brand was absent.
#[must_use]
pub fn theme_gaps(non_mentions: &[&AnswerSignal]) -> Vec<ThemeGap> {
    let lowered: Vec<String> = non_mentions
        .iter()
        .map(|s| s.response.to_lowercase())
        .collect();

    let mut gaps: Vec<ThemeGap> = GAP_THEMES
        .iter()
        .filter_map(|&theme| {
            let hits: Vec<(usize, usize)> = lowered
                .iter()
                .enumerate()
                .filter_map(|(i, text)| text.find(theme).map(|pos| (i, pos)))
                .collect();
            if hits.is_empty() {
                return None;
            }
            let examples = hits
                .iter()
                .take(MAX_EXAMPLES)
                .map(|&(i, pos)| ThemeExample {
                    query: non_mentions[i].query.clone(),
                    competitors: non_mentions[i].competitors.clone(),
                    context: char_window(&lowered[i], pos, theme.len(), CONTEXT_CHARS),
                })
                .collect();
            Some(ThemeGap {
                theme: theme.to_string(),
                frequency: hits.len(),
                percentage: percent(hits.len(), non_mentions.len()),
                examples,
            })
        })
        .collect();

    gaps.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    gaps
}

/// Top `n` themes with an impact rating: High > 5, Medium > 2, else Low.
#[must_use]
pub fn top_missing_themes(gaps: &[ThemeGap], n: usize) -> Vec<MissingTheme> {
    gaps.iter()
        .take(n)
        .map(|gap| MissingTheme {
            theme: gap.theme.clone(),
            frequency: gap.frequency,
            impact: if gap.frequency > 5 {
                Priority::High
            } else if gap.frequency > 2 {
                Priority::Medium
            } else {
                Priority::Low
            },
        })
        .collect()
}

/// Group answers by the first intent group whose terms appear in the query.
/// Empty groups are dropped; order follows the group table.
#[must_use]
pub fn group_queries<'a>(signals: &[&'a AnswerSignal]) -> Vec<(&'static str, Vec<&'a AnswerSignal>)> {
    let mut groups: Vec<(&'static str, Vec<&'a AnswerSignal>)> = QUERY_GROUPS
        .iter()
        .map(|(name, _)| (*name, Vec::new()))
        .chain(std::iter::once((GENERAL_GROUP, Vec::new())))
        .collect();

    for &signal in signals {
        let query = signal.query.to_lowercase();
        let slot = QUERY_GROUPS
            .iter()
            .position(|(_, terms)| terms.iter().any(|t| query.contains(t)))
            .unwrap_or(QUERY_GROUPS.len());
        groups[slot].1.push(signal);
    }

    groups.retain(|(_, members)| !members.is_empty());
    groups
}

/// Gap analysis over the answers that did not mention the brand.
pub async fn analyze_gaps<P: InsightProvider>(
    signals: &[AnswerSignal],
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> GapReport {
    let non_mentions: Vec<&AnswerSignal> = signals.iter().filter(|s| !s.mentioned).collect();
    if non_mentions.is_empty() {
        return GapReport::all_mentioned(&context.brand, signals.len());
    }

    let theme_gaps = theme_gaps(&non_mentions);
    let groups = group_queries(&non_mentions);

    let reasons = join_all(
        groups
            .iter()
            .take(settings.max_gap_reasons)
            .map(|(name, members)| gap_reason(name, members, context, provider, settings)),
    )
    .await;

    let non_mention_rate = percent(non_mentions.len(), signals.len());
    let summary = summarize(&context.brand, non_mention_rate, &theme_gaps);

    tracing::debug!(
        brand = %context.brand,
        non_mentions = non_mentions.len(),
        themes = theme_gaps.len(),
        "gap analysis complete"
    );

    GapReport {
        total_non_mentions: non_mentions.len(),
        total_queries: signals.len(),
        non_mention_rate,
        reasons,
        top_missing_themes: top_missing_themes(&theme_gaps, TOP_THEMES),
        theme_gaps,
        summary,
    }
}

async fn gap_reason<P: InsightProvider>(
    group: &str,
    members: &[&AnswerSignal],
    context: &BrandContext,
    provider: &P,
    settings: &AnalyticsSettings,
) -> GapReason {
    // Groups are never empty after `group_queries`.
    let sample = members[0];
    let brand = &context.brand;
    let response: String = sample.response.chars().take(1000).collect();
    let competitors = sample
        .competitors
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    let prompt = format!(
        "Analyze why the brand \"{brand}\" was NOT mentioned in this AI response.\n\n\
         Query: {query}\n\n\
         AI Response: {response}\n\n\
         Competitors Mentioned: {competitors}\n\n\
         Provide a concise, actionable reason (2-3 sentences) explaining:\n\
         1. What competitors emphasized that {brand} likely lacks\n\
         2. Specific positioning gap or weakness",
        query = sample.query,
    );
    let fallback = format!(
        "Competitors dominated this query category. {brand} may lack visibility or relevant positioning."
    );
    let reason = generate_or_fallback(provider, &prompt, settings.insight_timeout, fallback).await;

    GapReason {
        query_category: group.to_string(),
        query_count: members.len(),
        reason,
        sample_query: sample.query.clone(),
    }
}

fn summarize(brand: &str, non_mention_rate: f64, gaps: &[ThemeGap]) -> String {
    let Some(top) = gaps.first() else {
        return format!("{brand} appears to have strong visibility. No major gaps detected.");
    };
    let leading: Vec<&str> = gaps.iter().take(3).map(|g| g.theme.as_str()).collect();
    format!(
        "{brand} was not mentioned in {non_mention_rate}% of queries. The primary gap is '{}': \
         competitors consistently emphasize this while your brand positioning may lack clarity \
         in this area. Consider strengthening messaging around {}.",
        top.theme,
        leading.join(", ")
    )
}

#[cfg(test)]
#[path = "gaps_test.rs"]
mod tests;
