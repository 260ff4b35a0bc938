//! Sub-batch scores and competitor frequency.

use std::collections::{BTreeMap, HashMap};

use aivis_core::{AnswerSignal, ScoreBreakdown};
use serde::Serialize;

use crate::scorer::score;

/// Grouping key for answers without an intent category.
pub const OTHER_CATEGORY: &str = "Other";
/// Grouping key for answers without a model identifier.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// Score each intent category separately.
#[must_use]
pub fn category_breakdown(signals: &[AnswerSignal]) -> BTreeMap<String, ScoreBreakdown> {
    breakdown_by(signals, |s| {
        s.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(OTHER_CATEGORY)
            .to_string()
    })
}

/// Score each model separately.
#[must_use]
pub fn model_breakdown(signals: &[AnswerSignal]) -> BTreeMap<String, ScoreBreakdown> {
    breakdown_by(signals, |s| {
        if s.model.trim().is_empty() {
            UNKNOWN_MODEL.to_string()
        } else {
            s.model.clone()
        }
    })
}

fn breakdown_by<F>(signals: &[AnswerSignal], key: F) -> BTreeMap<String, ScoreBreakdown>
where
    F: Fn(&AnswerSignal) -> String,
{
    let mut groups: BTreeMap<String, Vec<AnswerSignal>> = BTreeMap::new();
    for signal in signals {
        groups.entry(key(signal)).or_default().push(signal.clone());
    }
    groups
        .into_iter()
        .map(|(name, group)| {
            let breakdown = score(&group);
            (name, breakdown)
        })
        .collect()
}

/// How often one competitor was named across a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorCount {
    pub name: String,
    pub count: usize,
}

/// The `n` most frequently named competitors, highest count first.
///
/// Ties keep the order in which competitors were first seen.
#[must_use]
pub fn top_competitors(signals: &[AnswerSignal], n: usize) -> Vec<CompetitorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CompetitorCount> = Vec::new();

    for competitor in signals.iter().flat_map(|s| s.competitors.iter()) {
        match index.get(competitor.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(competitor.as_str(), counts.len());
                counts.push(CompetitorCount {
                    name: competitor.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}
