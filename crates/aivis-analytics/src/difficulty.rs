//! Per-query competitive difficulty.
//!
//! Three independently bucketed factors are summed into a 0–100 score:
//! competitor count (10/25/40), brand mention quality (5/20/30) and query
//! specificity (10/20/30).

use std::collections::BTreeMap;

use aivis_core::AnswerSignal;
use serde::Serialize;

/// Query terms that signal a crowded comparison query.
const HIGH_COMPETITION_TERMS: &[&str] = &["best", "top", "vs", "comparison", "review"];
const EASY_OPPORTUNITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyLevel::Easy => write!(f, "Easy"),
            DifficultyLevel::Medium => write!(f, "Medium"),
            DifficultyLevel::Hard => write!(f, "Hard"),
        }
    }
}

/// Bucket a difficulty score: Easy < 40 ≤ Medium < 70 ≤ Hard.
#[must_use]
pub fn difficulty_level(score: u32) -> DifficultyLevel {
    if score >= 70 {
        DifficultyLevel::Hard
    } else if score >= 40 {
        DifficultyLevel::Medium
    } else {
        DifficultyLevel::Easy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredQuery {
    pub query: String,
    pub difficulty: DifficultyLevel,
    pub score: u32,
    /// Comma-separated factor descriptions.
    pub reasoning: String,
    pub mentioned: bool,
    pub competitor_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyReport {
    pub scored_queries: Vec<ScoredQuery>,
    pub difficulty_distribution: BTreeMap<DifficultyLevel, usize>,
    pub easy_opportunities_count: usize,
    /// First ten Easy queries where the brand was absent.
    pub easy_opportunities: Vec<ScoredQuery>,
    pub average_difficulty_score: f64,
}

/// Score one answer's query.
#[must_use]
pub fn score_query(signal: &AnswerSignal) -> ScoredQuery {
    let mut score = 0;
    let mut factors = Vec::with_capacity(3);

    let competitor_count = signal.competitors.len();
    if competitor_count > 8 {
        score += 40;
        factors.push(format!("{competitor_count} competitors"));
    } else if competitor_count > 4 {
        score += 25;
        factors.push(format!("{competitor_count} competitors"));
    } else {
        score += 10;
        factors.push(format!("Only {competitor_count} competitors"));
    }

    if !signal.mentioned {
        score += 30;
        factors.push("Brand absent".to_string());
    } else {
        match signal.rank {
            Some(rank) if rank <= 5 => {
                score += 5;
                factors.push(format!("Good rank (#{rank})"));
            }
            Some(rank) => {
                score += 20;
                factors.push(format!("Low rank (#{rank})"));
            }
            None => {
                score += 20;
                factors.push("Mentioned without rank".to_string());
            }
        }
    }

    let query = signal.query.to_lowercase();
    if HIGH_COMPETITION_TERMS.iter().any(|t| query.contains(t)) {
        score += 30;
        factors.push("High-competition keywords".to_string());
    } else if query.split_whitespace().count() > 8 {
        score += 10;
        factors.push("Niche/specific query".to_string());
    } else {
        score += 20;
        factors.push("General query".to_string());
    }

    ScoredQuery {
        query: signal.query.clone(),
        difficulty: difficulty_level(score),
        score,
        reasoning: factors.join(", "),
        mentioned: signal.mentioned,
        competitor_count,
    }
}

#[must_use]
pub fn analyze_difficulty(signals: &[AnswerSignal]) -> DifficultyReport {
    let scored_queries: Vec<ScoredQuery> = signals.iter().map(score_query).collect();

    let mut difficulty_distribution = BTreeMap::new();
    for q in &scored_queries {
        *difficulty_distribution.entry(q.difficulty).or_insert(0) += 1;
    }

    let easy: Vec<&ScoredQuery> = scored_queries
        .iter()
        .filter(|q| q.difficulty == DifficultyLevel::Easy && !q.mentioned)
        .collect();
    let easy_opportunities_count = easy.len();
    let easy_opportunities = easy
        .into_iter()
        .take(EASY_OPPORTUNITY_LIMIT)
        .cloned()
        .collect();

    let average_difficulty_score = if scored_queries.is_empty() {
        0.0
    } else {
        let total: u32 = scored_queries.iter().map(|q| q.score).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = f64::from(total) / scored_queries.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    DifficultyReport {
        scored_queries,
        difficulty_distribution,
        easy_opportunities_count,
        easy_opportunities,
        average_difficulty_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(query: &str, mentioned: bool, rank: Option<u32>, competitors: usize) -> AnswerSignal {
        let mut s = AnswerSignal::not_mentioned("");
        s.query = query.to_string();
        s.mentioned = mentioned;
        s.rank = rank;
        s.competitors = (0..competitors).map(|i| format!("Brand{i}")).collect();
        s
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(difficulty_level(39), DifficultyLevel::Easy);
        assert_eq!(difficulty_level(40), DifficultyLevel::Medium);
        assert_eq!(difficulty_level(69), DifficultyLevel::Medium);
        assert_eq!(difficulty_level(70), DifficultyLevel::Hard);
    }

    #[test]
    fn crowded_comparison_query_is_hard() {
        let q = score_query(&signal("best meal kits vs grocery", false, None, 9));
        assert_eq!(q.score, 100);
        assert_eq!(q.difficulty, DifficultyLevel::Hard);
        assert_eq!(
            q.reasoning,
            "9 competitors, Brand absent, High-competition keywords"
        );
    }

    #[test]
    fn well_ranked_general_query_is_easy() {
        let q = score_query(&signal("meal kits for couples", true, Some(2), 1));
        // 10 + 5 + 20
        assert_eq!(q.score, 35);
        assert_eq!(q.difficulty, DifficultyLevel::Easy);
    }

    #[test]
    fn unranked_mention_counts_as_low_rank() {
        let q = score_query(&signal("meal kits for couples", true, None, 5));
        // 25 + 20 + 20
        assert_eq!(q.score, 65);
        assert_eq!(q.difficulty, DifficultyLevel::Medium);
    }

    #[test]
    fn long_query_is_niche() {
        let q = score_query(&signal(
            "which meal kit works for a gluten free family of five on weekdays",
            false,
            None,
            0,
        ));
        // 10 + 30 + 10
        assert_eq!(q.score, 50);
    }

    #[test]
    fn report_surfaces_easy_absent_queries() {
        let batch = vec![
            // 10 + 5 + 20 = 35, mentioned: not an opportunity
            signal("meal kits for couples", true, Some(1), 0),
            // 10 + 30 + 10 = 50: medium
            signal(
                "which meal kit works for a gluten free family of five on weekdays",
                false,
                None,
                0,
            ),
        ];
        let report = analyze_difficulty(&batch);
        assert_eq!(report.easy_opportunities_count, 0);
        assert_eq!(report.difficulty_distribution[&DifficultyLevel::Easy], 1);
        assert_eq!(report.difficulty_distribution[&DifficultyLevel::Medium], 1);
        assert!((report.average_difficulty_score - 42.5).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_report() {
        let report = analyze_difficulty(&[]);
        assert!(report.scored_queries.is_empty());
        assert_eq!(report.average_difficulty_score, 0.0);
    }
}
