//! Composite visibility score over a batch of answer signals.
//!
//! Four components, weighted 40/30/20/10:
//! - mention rate: share of answers mentioning the brand
//! - rank score: average recovered rank, inverted
//! - competitor dominance: how often the brand out-ranks named competitors
//! - model consistency: inverse variance of per-model mention rates

use std::collections::BTreeMap;

use aivis_core::{AnswerSignal, ScoreBreakdown};
use aivis_extract::numbered_rank;

pub const MENTION_WEIGHT: f64 = 40.0;
pub const RANK_WEIGHT: f64 = 30.0;
pub const DOMINANCE_WEIGHT: f64 = 20.0;
pub const CONSISTENCY_WEIGHT: f64 = 10.0;

/// Points lost per rank position below first.
const RANK_STEP: f64 = 3.0;
/// Dominance value when no answer has comparable competitor ranks.
const NEUTRAL_DOMINANCE: f64 = 10.0;
/// Scale applied to mention-rate variance (max variance 0.25 maps to 10).
const VARIANCE_PENALTY: f64 = 40.0;

/// Score a batch of signals. An empty batch scores zero on every component.
#[must_use]
pub fn score(signals: &[AnswerSignal]) -> ScoreBreakdown {
    if signals.is_empty() {
        return ScoreBreakdown::empty();
    }

    let total_queries = signals.len();
    let mentions = signals.iter().filter(|s| s.mentioned).count();

    #[allow(clippy::cast_precision_loss)]
    let mention_rate = mentions as f64 / total_queries as f64 * MENTION_WEIGHT;

    let average_rank = average_rank(signals);
    let rank_score = average_rank.map_or(0.0, |avg| (RANK_WEIGHT - (avg - 1.0) * RANK_STEP).max(0.0));

    let competitor_dominance = competitor_dominance(signals);
    let model_consistency = model_consistency(signals);
    let overall_score = mention_rate + rank_score + competitor_dominance + model_consistency;

    tracing::debug!(total_queries, mentions, overall_score, "batch scored");

    ScoreBreakdown {
        overall_score,
        mention_rate,
        rank_score,
        competitor_dominance,
        model_consistency,
        mentions,
        total_queries,
        average_rank,
    }
}

/// Mean rank over answers that carry one, or `None` when none do.
#[must_use]
pub fn average_rank(signals: &[AnswerSignal]) -> Option<f64> {
    let ranks: Vec<f64> = signals
        .iter()
        .filter_map(|s| s.rank)
        .map(f64::from)
        .collect();
    if ranks.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = ranks.iter().sum::<f64>() / ranks.len() as f64;
    Some(mean)
}

/// Win rate against competitors whose numbered-list rank can be recovered.
///
/// A win is the brand ranking above every recovered competitor; ranking
/// above only some of them counts half.
#[must_use]
pub fn competitor_dominance(signals: &[AnswerSignal]) -> f64 {
    let mut wins = 0.0;
    let mut comparable = 0usize;

    for signal in signals {
        let Some(brand_rank) = signal.rank else {
            continue;
        };
        if signal.competitors.is_empty() {
            continue;
        }

        let competitor_ranks: Vec<u32> = signal
            .competitors
            .iter()
            .filter_map(|c| numbered_rank(&signal.response, c).map(|(rank, _)| rank))
            .collect();
        let (Some(best), Some(worst)) = (
            competitor_ranks.iter().min().copied(),
            competitor_ranks.iter().max().copied(),
        ) else {
            continue;
        };

        comparable += 1;
        if brand_rank < best {
            wins += 1.0;
        } else if brand_rank < worst {
            wins += 0.5;
        }
    }

    if comparable == 0 {
        return NEUTRAL_DOMINANCE;
    }
    #[allow(clippy::cast_precision_loss)]
    let win_rate = wins / comparable as f64;
    win_rate * DOMINANCE_WEIGHT
}

/// Full credit minus a penalty for variance in per-model mention rates.
///
/// With fewer than two models consistency is undefined and scores full.
#[must_use]
pub fn model_consistency(signals: &[AnswerSignal]) -> f64 {
    let mut per_model: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for signal in signals {
        let entry = per_model.entry(signal.model.as_str()).or_default();
        entry.1 += 1;
        if signal.mentioned {
            entry.0 += 1;
        }
    }

    if per_model.len() < 2 {
        return CONSISTENCY_WEIGHT;
    }

    #[allow(clippy::cast_precision_loss)]
    let rates: Vec<f64> = per_model
        .values()
        .map(|&(mentioned, total)| mentioned as f64 / total as f64)
        .collect();
    let variance = population_variance(&rates);
    (CONSISTENCY_WEIGHT - variance * VARIANCE_PENALTY).max(0.0)
}

fn population_variance(values: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
