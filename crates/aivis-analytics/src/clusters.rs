//! Competitor dominance grouped by shopper-intent clusters.

use aivis_core::AnswerSignal;
use serde::Serialize;

use crate::counts::{ranked_counts, NamedCount};

/// Named clusters and the query terms that place a query in them.
/// A query may fall into several clusters.
pub const CLUSTERS: &[(&str, &[&str])] = &[
    (
        "Price-Sensitive",
        &["cheap", "affordable", "budget", "cost", "inexpensive", "discount"],
    ),
    (
        "Health-Conscious",
        &["healthy", "nutrition", "organic", "diet", "wellness", "fitness"],
    ),
    (
        "Fast-Delivery",
        &["fast", "quick", "express", "same-day", "speed", "delivery"],
    ),
    (
        "Family-Sized",
        &["family", "large", "kids", "children", "portions", "bulk"],
    ),
    (
        "Eco-Friendly",
        &["eco", "sustainable", "green", "organic", "environment", "carbon"],
    ),
];

const TARGET_THRESHOLD: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub name: String,
    pub dominant_competitor: String,
    pub mention_count: usize,
    pub top_competitors: Vec<NamedCount>,
    pub total_mentions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterReport {
    /// Only clusters that matched at least one competitor mention.
    pub clusters: Vec<Cluster>,
    pub insights: Vec<String>,
}

#[must_use]
pub fn cluster_competitors(signals: &[AnswerSignal]) -> ClusterReport {
    let clusters: Vec<Cluster> = CLUSTERS
        .iter()
        .filter_map(|(name, terms)| {
            let mentions = signals
                .iter()
                .filter(|s| {
                    let query = s.query.to_lowercase();
                    terms.iter().any(|t| query.contains(t))
                })
                .flat_map(|s| s.competitors.iter());
            let counts = ranked_counts(mentions);
            let dominant = counts.first()?;

            Some(Cluster {
                name: (*name).to_string(),
                dominant_competitor: dominant.name.clone(),
                mention_count: dominant.count,
                total_mentions: counts.iter().map(|c| c.count).sum(),
                top_competitors: counts.into_iter().take(5).collect(),
            })
        })
        .collect();

    let insights = clusters
        .iter()
        .map(|c| {
            let advice = if c.mention_count > TARGET_THRESHOLD {
                "Your brand should target this cluster."
            } else {
                "Moderate competition."
            };
            format!(
                "{}: {} dominates with {} mentions. {advice}",
                c.name, c.dominant_competitor, c.mention_count
            )
        })
        .collect();

    ClusterReport { clusters, insights }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(query: &str, competitors: &[&str]) -> AnswerSignal {
        let mut s = AnswerSignal::not_mentioned("");
        s.query = query.to_string();
        s.competitors = competitors.iter().map(|c| (*c).to_string()).collect();
        s
    }

    #[test]
    fn query_can_land_in_several_clusters() {
        let batch = vec![
            answer("organic meal kits", &["Green Chef", "Sunbasket"]),
            answer("cheap family dinners", &["EveryPlate"]),
            answer("sustainable kits", &["Sunbasket"]),
        ];
        let report = cluster_competitors(&batch);
        let names: Vec<&str> = report.clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Price-Sensitive", "Health-Conscious", "Family-Sized", "Eco-Friendly"]
        );

        let eco = &report.clusters[3];
        assert_eq!(eco.dominant_competitor, "Sunbasket");
        assert_eq!(eco.mention_count, 2);
        assert_eq!(eco.total_mentions, 3);

        let health = &report.clusters[1];
        // Tie between Green Chef and Sunbasket resolves to first seen.
        assert_eq!(health.dominant_competitor, "Green Chef");
    }

    #[test]
    fn insight_advises_targeting_crowded_clusters() {
        let batch: Vec<AnswerSignal> = (0..6).map(|_| answer("cheap kits", &["EveryPlate"])).collect();
        let report = cluster_competitors(&batch);
        assert_eq!(
            report.insights,
            vec!["Price-Sensitive: EveryPlate dominates with 6 mentions. Your brand should target this cluster."]
        );
    }

    #[test]
    fn unmatched_queries_yield_no_clusters() {
        let report = cluster_competitors(&[answer("meal kits", &["Factor"])]);
        assert!(report.clusters.is_empty());
        assert!(report.insights.is_empty());
    }
}
