//! How individual answer models treat the brand.

use std::collections::HashSet;

use aivis_core::{AnswerSignal, Sentiment};
use serde::Serialize;

use crate::counts::{ranked_counts, NamedCount};
use crate::priority::Priority;
use crate::text::{percent, round1};

const GENERAL_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub model: String,
    pub total_queries: usize,
    pub mentions: usize,
    /// Percentage, one decimal.
    pub mention_rate: f64,
    pub avg_rank: Option<f64>,
    pub unique_competitors: usize,
    pub top_competitors: Vec<NamedCount>,
    /// Sentiment of the answers that mentioned the brand.
    pub sentiment_distribution: Vec<NamedCount>,
    pub category_preferences: Vec<NamedCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelPatterns {
    pub model: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelComparison {
    pub metric: String,
    pub finding: String,
    pub best_model: String,
    pub worst_model: String,
    pub impact: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelBehaviorReport {
    pub model_statistics: Vec<ModelStats>,
    pub behavioral_patterns: Vec<ModelPatterns>,
    pub model_comparisons: Vec<ModelComparison>,
    pub key_insights: Vec<String>,
}

#[must_use]
pub fn analyze_model_behavior(signals: &[AnswerSignal], brand: &str) -> ModelBehaviorReport {
    let stats = model_stats(signals);
    let behavioral_patterns = stats
        .iter()
        .map(|s| ModelPatterns {
            model: s.model.clone(),
            patterns: patterns_for(s),
        })
        .collect::<Vec<_>>();
    let model_comparisons = compare_models(&stats, brand);
    let key_insights = insights(&stats, &behavioral_patterns, brand);

    ModelBehaviorReport {
        model_statistics: stats,
        behavioral_patterns,
        model_comparisons,
        key_insights,
    }
}

/// Per-model statistics in first-seen model order.
#[must_use]
pub fn model_stats(signals: &[AnswerSignal]) -> Vec<ModelStats> {
    let mut models: Vec<&str> = Vec::new();
    for s in signals {
        if !models.contains(&s.model.as_str()) {
            models.push(&s.model);
        }
    }

    models
        .into_iter()
        .map(|model| {
            let answers: Vec<&AnswerSignal> = signals.iter().filter(|s| s.model == model).collect();
            let mentioned: Vec<&AnswerSignal> =
                answers.iter().copied().filter(|s| s.mentioned).collect();

            let ranks: Vec<f64> = mentioned.iter().filter_map(|s| s.rank).map(f64::from).collect();
            #[allow(clippy::cast_precision_loss)]
            let avg_rank = (!ranks.is_empty())
                .then(|| round1(ranks.iter().sum::<f64>() / ranks.len() as f64));

            let competitors = answers.iter().flat_map(|s| s.competitors.iter());
            let unique_competitors = competitors.clone().collect::<HashSet<_>>().len();

            ModelStats {
                model: model.to_string(),
                total_queries: answers.len(),
                mentions: mentioned.len(),
                mention_rate: percent(mentioned.len(), answers.len()),
                avg_rank,
                unique_competitors,
                top_competitors: ranked_counts(competitors).into_iter().take(5).collect(),
                sentiment_distribution: ranked_counts(
                    mentioned.iter().map(|s| s.sentiment.to_string()),
                ),
                category_preferences: ranked_counts(
                    answers
                        .iter()
                        .map(|s| s.category.as_deref().unwrap_or(GENERAL_CATEGORY)),
                )
                .into_iter()
                .take(5)
                .collect(),
            }
        })
        .collect()
}

fn sentiment_count(stats: &ModelStats, sentiment: Sentiment) -> usize {
    let label = sentiment.to_string();
    stats
        .sentiment_distribution
        .iter()
        .find(|c| c.name == label)
        .map_or(0, |c| c.count)
}

fn patterns_for(stats: &ModelStats) -> Vec<String> {
    let mut patterns = Vec::new();

    if stats.mention_rate > 70.0 {
        patterns.push(format!(
            "High brand affinity ({}% mention rate)",
            stats.mention_rate
        ));
    } else if stats.mention_rate < 30.0 {
        patterns.push(format!(
            "Low brand visibility ({}% mention rate)",
            stats.mention_rate
        ));
    }

    match stats.avg_rank {
        Some(rank) if rank < 3.0 => {
            patterns.push("Tends to rank brand highly when mentioned".to_string());
        }
        Some(rank) if rank > 5.0 => {
            patterns.push("Mentions brand but ranks it lower".to_string());
        }
        _ => {}
    }

    if stats.unique_competitors > 15 {
        patterns.push("Mentions diverse competitor set".to_string());
    } else if stats.unique_competitors < 8 {
        patterns.push("Focuses on established/major competitors".to_string());
    }

    if let Some(top) = stats.category_preferences.first() {
        patterns.push(format!("Specializes in '{}' queries", top.name));
    }

    let positive = sentiment_count(stats, Sentiment::Positive);
    let negative = sentiment_count(stats, Sentiment::Negative);
    let hesitant = sentiment_count(stats, Sentiment::Hesitant);
    if positive > negative + hesitant {
        patterns.push("Predominantly positive brand sentiment".to_string());
    } else if negative > 0 {
        patterns.push("Contains negative/critical mentions".to_string());
    }

    patterns
}

/// First stats entry with the highest `key`.
fn best_by<F: Fn(&ModelStats) -> f64>(stats: &[ModelStats], key: F) -> Option<&ModelStats> {
    stats.iter().rev().max_by(|a, b| key(a).total_cmp(&key(b)))
}

/// First stats entry with the lowest `key`.
fn worst_by<F: Fn(&ModelStats) -> f64>(stats: &[ModelStats], key: F) -> Option<&ModelStats> {
    stats.iter().min_by(|a, b| key(a).total_cmp(&key(b)))
}

fn compare_models(stats: &[ModelStats], brand: &str) -> Vec<ModelComparison> {
    let mut comparisons = Vec::new();

    if let (Some(best), Some(worst)) = (
        best_by(stats, |s| s.mention_rate),
        worst_by(stats, |s| s.mention_rate),
    ) {
        let ratio = if worst.mention_rate > 0.0 {
            best.mention_rate / worst.mention_rate
        } else {
            0.0
        };
        comparisons.push(ModelComparison {
            metric: "Brand Mention Bias".to_string(),
            finding: format!(
                "{} is {ratio:.1}x more likely to mention {brand} than {}",
                best.model, worst.model
            ),
            best_model: best.model.clone(),
            worst_model: worst.model.clone(),
            impact: if ratio > 2.0 {
                Priority::High
            } else {
                Priority::Medium
            },
        });
    }

    let ranked: Vec<ModelStats> = stats.iter().filter(|s| s.avg_rank.is_some()).cloned().collect();
    if ranked.len() >= 2 {
        let rank = |s: &ModelStats| s.avg_rank.unwrap_or(f64::MAX);
        if let (Some(best), Some(worst)) = (worst_by(&ranked, rank), best_by(&ranked, rank)) {
            comparisons.push(ModelComparison {
                metric: "Ranking Behavior".to_string(),
                finding: format!(
                    "{} ranks {brand} at avg position {:.1} vs {} at {:.1}",
                    best.model,
                    rank(best),
                    worst.model,
                    rank(worst)
                ),
                best_model: best.model.clone(),
                worst_model: worst.model.clone(),
                impact: Priority::Medium,
            });
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let diversity = |s: &ModelStats| s.unique_competitors as f64;
    if let (Some(most), Some(least)) = (best_by(stats, diversity), worst_by(stats, diversity)) {
        comparisons.push(ModelComparison {
            metric: "Competitor Diversity".to_string(),
            finding: format!(
                "{} mentions {} unique competitors vs {} with {}",
                most.model, most.unique_competitors, least.model, least.unique_competitors
            ),
            best_model: most.model.clone(),
            worst_model: least.model.clone(),
            impact: Priority::Low,
        });
    }

    comparisons
}

fn insights(stats: &[ModelStats], patterns: &[ModelPatterns], brand: &str) -> Vec<String> {
    let mut insights = Vec::new();

    if let (Some(best), Some(worst)) = (
        best_by(stats, |s| s.mention_rate),
        worst_by(stats, |s| s.mention_rate),
    ) {
        insights.push(format!(
            "Optimize for {w}: {brand} has only {}% visibility on {w}. Focus SEO and content \
             strategies that align with {w}'s preferences.",
            worst.mention_rate,
            w = worst.model
        ));
        insights.push(format!(
            "Leverage {b}: Strong {}% visibility on {b}. Use {b}'s API for customer-facing tools \
             to maximize brand exposure.",
            best.mention_rate,
            b = best.model
        ));
    }

    for entry in patterns {
        if entry
            .patterns
            .iter()
            .any(|p| p.starts_with("Low brand visibility"))
        {
            insights.push(format!(
                "{m} Challenge: This model rarely mentions {brand}. Consider whether {m} favors \
                 established brands, specific content formats, or trust signals you may lack.",
                m = entry.model
            ));
        }
    }

    if !stats.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let avg = stats.iter().map(|s| s.mention_rate).sum::<f64>() / stats.len() as f64;
        if avg < 40.0 {
            insights.push(format!(
                "General Pattern: All models show low brand recognition ({avg:.1}% avg). {brand} \
                 may benefit from AI-specific SEO optimization and brand authority building."
            ));
        }
    }

    insights
}
