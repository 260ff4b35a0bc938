//! Month-by-month projection of the score if recommendations are carried out.

use serde::Serialize;

use crate::priority::Priority;
use crate::recommendations::Recommendation;
use crate::text::{first_integer, round1};

/// Recommendations taken into the projection, one per month.
pub const MAX_PLANNED: usize = 5;

const DEFAULT_IMPACT: u32 = 10;
const DIMINISHING_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub month: usize,
    pub score: f64,
    pub changes: String,
    pub cumulative_effort: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineProjection {
    /// Month 0 is the baseline.
    pub timeline: Vec<TimelinePoint>,
    pub final_projected_score: f64,
    pub total_improvement: f64,
    pub estimated_duration_months: usize,
    pub effort_level: Priority,
}

fn effort_level(points: u32) -> Priority {
    if points > 8 {
        Priority::High
    } else if points > 4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

#[must_use]
pub fn simulate_timeline(current_score: f64, planned: &[Recommendation]) -> TimelineProjection {
    let planned = &planned[..planned.len().min(MAX_PLANNED)];

    let mut timeline = Vec::with_capacity(planned.len() + 1);
    timeline.push(TimelinePoint {
        month: 0,
        score: round1(current_score),
        changes: "Baseline".to_string(),
        cumulative_effort: 0,
    });

    let mut score = current_score;
    let mut effort = 0;
    let mut damping = 1.0;
    for (i, rec) in planned.iter().enumerate() {
        let impact = first_integer(&rec.expected_impact).unwrap_or(DEFAULT_IMPACT);
        score = (score + f64::from(impact) * damping).min(100.0);
        damping *= DIMINISHING_FACTOR;
        effort += rec.effort.effort_points();

        timeline.push(TimelinePoint {
            month: i + 1,
            score: round1(score),
            changes: rec.action.clone(),
            cumulative_effort: effort,
        });
    }

    TimelineProjection {
        timeline,
        final_projected_score: round1(score),
        total_improvement: round1(score - current_score),
        estimated_duration_months: planned.len(),
        effort_level: effort_level(effort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::RecommendationKind;

    fn rec(expected_impact: &str, effort: Priority) -> Recommendation {
        Recommendation {
            priority: Priority::High,
            category: RecommendationKind::TrustBuilding,
            action: "act".to_string(),
            details: String::new(),
            expected_impact: expected_impact.to_string(),
            effort,
            timeframe: String::new(),
        }
    }

    #[test]
    fn impacts_diminish_per_month() {
        let plan = vec![
            rec("+20-30% overall visibility", Priority::Medium),
            rec("+10-20% visibility", Priority::Medium),
        ];
        let projection = simulate_timeline(40.0, &plan);
        assert_eq!(projection.timeline.len(), 3);
        assert!((projection.timeline[1].score - 60.0).abs() < 1e-9);
        assert!((projection.final_projected_score - 69.0).abs() < 1e-9);
        assert!((projection.total_improvement - 29.0).abs() < 1e-9);
        assert_eq!(projection.timeline[2].cumulative_effort, 4);
        assert_eq!(projection.effort_level, Priority::Low);
    }

    #[test]
    fn missing_impact_number_defaults_to_ten() {
        let projection = simulate_timeline(0.0, &[rec("unknown", Priority::Low)]);
        assert!((projection.final_projected_score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn score_clamps_and_plan_caps_at_five() {
        let plan: Vec<Recommendation> = (0..7).map(|_| rec("+30%", Priority::High)).collect();
        let projection = simulate_timeline(90.0, &plan);
        assert_eq!(projection.estimated_duration_months, 5);
        assert!((projection.final_projected_score - 100.0).abs() < 1e-9);
        assert_eq!(projection.effort_level, Priority::High);
    }

    #[test]
    fn empty_plan_is_baseline_only() {
        let projection = simulate_timeline(55.5, &[]);
        assert_eq!(projection.timeline.len(), 1);
        assert_eq!(projection.timeline[0].changes, "Baseline");
        assert_eq!(projection.effort_level, Priority::Low);
    }
}
