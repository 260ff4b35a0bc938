//! Human-readable bands for the overall visibility score.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisibilityLevel {
    Dominant,
    Strong,
    Moderate,
    Low,
    Minimal,
}

impl VisibilityLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VisibilityLevel::Dominant => "Dominant Presence",
            VisibilityLevel::Strong => "Strong Visibility",
            VisibilityLevel::Moderate => "Moderate Visibility",
            VisibilityLevel::Low => "Low Visibility",
            VisibilityLevel::Minimal => "Minimal Visibility",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            VisibilityLevel::Dominant => {
                "Your brand consistently appears at the top of AI recommendations"
            }
            VisibilityLevel::Strong => "Your brand is frequently mentioned and well-ranked",
            VisibilityLevel::Moderate => {
                "Your brand appears regularly but with room for improvement"
            }
            VisibilityLevel::Low => "Your brand is rarely mentioned by AI models",
            VisibilityLevel::Minimal => "Your brand has very limited presence in AI responses",
        }
    }
}

impl std::fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Band an overall score: Dominant ≥ 90, Strong ≥ 70, Moderate ≥ 50, Low ≥ 30.
#[must_use]
pub fn interpret_score(score: f64) -> VisibilityLevel {
    if score >= 90.0 {
        VisibilityLevel::Dominant
    } else if score >= 70.0 {
        VisibilityLevel::Strong
    } else if score >= 50.0 {
        VisibilityLevel::Moderate
    } else if score >= 30.0 {
        VisibilityLevel::Low
    } else {
        VisibilityLevel::Minimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(interpret_score(90.0), VisibilityLevel::Dominant);
        assert_eq!(interpret_score(89.99), VisibilityLevel::Strong);
        assert_eq!(interpret_score(70.0), VisibilityLevel::Strong);
        assert_eq!(interpret_score(50.0), VisibilityLevel::Moderate);
        assert_eq!(interpret_score(30.0), VisibilityLevel::Low);
        assert_eq!(interpret_score(29.9), VisibilityLevel::Minimal);
        assert_eq!(interpret_score(0.0), VisibilityLevel::Minimal);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(VisibilityLevel::Moderate.to_string(), "Moderate Visibility");
    }
}
