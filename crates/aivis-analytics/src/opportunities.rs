//! Queries where the brand should have appeared but did not.

use aivis_core::AnswerSignal;
use serde::Serialize;

use crate::context::BrandContext;
use crate::priority::Priority;

const MAX_OPPORTUNITIES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    pub query: String,
    pub reason: String,
    /// Up to five competitors named in the answer.
    pub competitors_present: Vec<String>,
    pub priority: Priority,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityReport {
    pub total_opportunities: usize,
    pub high_priority: usize,
    /// Highest priority first, at most twenty.
    pub opportunities: Vec<Opportunity>,
    pub summary: String,
}

/// Why an absent brand should have appeared, or `None` when it plausibly should not.
fn relevance(signal: &AnswerSignal, context: &BrandContext) -> Option<(Priority, String)> {
    let query = signal.query.to_lowercase();
    let competitors = &signal.competitors;

    if competitors.len() >= 2 {
        return Some((
            Priority::High,
            format!(
                "Multiple similar competitors ({}, {}) appear, but {} doesn't",
                competitors[0], competitors[1], context.brand
            ),
        ));
    }

    let in_industry = context
        .industry_keywords
        .iter()
        .any(|k| query.contains(k.as_str()));
    if in_industry && !competitors.is_empty() {
        return Some((
            Priority::Medium,
            "Industry-relevant query with competitors present".to_string(),
        ));
    }

    if context
        .feature_keywords
        .iter()
        .any(|k| query.contains(k.as_str()))
    {
        return Some((
            Priority::Medium,
            "Query emphasizes features brand likely offers".to_string(),
        ));
    }

    None
}

#[must_use]
pub fn detect_opportunities(signals: &[AnswerSignal], context: &BrandContext) -> OpportunityReport {
    let mut opportunities: Vec<Opportunity> = signals
        .iter()
        .filter(|s| !s.mentioned)
        .filter_map(|s| {
            relevance(s, context).map(|(priority, reason)| Opportunity {
                query: s.query.clone(),
                reason,
                competitors_present: s.competitors.iter().take(5).cloned().collect(),
                priority,
                model: s.model.clone(),
            })
        })
        .collect();

    // Stable sort keeps batch order within a priority.
    opportunities.sort_by_key(|o| o.priority);

    let total_opportunities = opportunities.len();
    let high_priority = opportunities
        .iter()
        .filter(|o| o.priority == Priority::High)
        .count();
    let summary = if total_opportunities == 0 {
        "No significant missed opportunities detected.".to_string()
    } else {
        format!(
            "Found {total_opportunities} missed opportunities where {} should appear but doesn't. \
             {high_priority} are high-priority (direct competitors present). \
             Prioritize these for immediate content creation.",
            context.brand
        )
    };

    opportunities.truncate(MAX_OPPORTUNITIES);

    OpportunityReport {
        total_opportunities,
        high_priority,
        opportunities,
        summary,
    }
}
