//! Brand framing and tunables shared by the analytics reports.

use std::time::Duration;

use aivis_core::{AppConfig, BrandProfile};
use serde::Serialize;

const DEFAULT_INDUSTRY_KEYWORDS: &[&str] = &[
    "meal kit",
    "delivery",
    "subscription",
    "service",
    "platform",
    "app",
];
const DEFAULT_FEATURE_KEYWORDS: &[&str] = &["affordable", "organic", "fast", "easy", "best"];

/// Brand and industry framing for the analytics suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandContext {
    pub brand: String,
    pub industry: String,
    /// Lowercase query terms marking a query as in-industry. Always contains
    /// the lowercase industry name.
    pub industry_keywords: Vec<String>,
    /// Lowercase query terms for features the brand plausibly offers.
    pub feature_keywords: Vec<String>,
}

impl BrandContext {
    /// Context with the default keyword lists.
    #[must_use]
    pub fn new(brand: &str, industry: &str) -> Self {
        Self::with_keywords(brand, industry, &[], &[])
    }

    /// Context using a brand profile's keyword lists, falling back to the
    /// defaults for any list the profile leaves empty.
    #[must_use]
    pub fn from_profile(profile: &BrandProfile) -> Self {
        Self::with_keywords(
            &profile.name,
            &profile.industry,
            &profile.industry_keywords,
            &profile.feature_keywords,
        )
    }

    fn with_keywords(
        brand: &str,
        industry: &str,
        industry_keywords: &[String],
        feature_keywords: &[String],
    ) -> Self {
        let mut industry_list = keyword_list(industry_keywords, DEFAULT_INDUSTRY_KEYWORDS);
        let industry_lower = industry.trim().to_lowercase();
        if !industry_lower.is_empty() && !industry_list.contains(&industry_lower) {
            industry_list.push(industry_lower);
        }

        Self {
            brand: brand.trim().to_string(),
            industry: industry.trim().to_string(),
            industry_keywords: industry_list,
            feature_keywords: keyword_list(feature_keywords, DEFAULT_FEATURE_KEYWORDS),
        }
    }
}

fn keyword_list(configured: &[String], defaults: &[&str]) -> Vec<String> {
    let cleaned: Vec<String> = configured
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if cleaned.is_empty() {
        defaults.iter().map(|k| (*k).to_string()).collect()
    } else {
        cleaned
    }
}

/// Tunables for provider-backed analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// Hard bound on each insight-provider call.
    pub insight_timeout: Duration,
    /// Competitors that receive a provider-written insight.
    pub max_competitor_insights: usize,
    /// Query groups that receive a provider-written gap reason.
    pub max_gap_reasons: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            insight_timeout: Duration::from_secs(20),
            max_competitor_insights: 8,
            max_gap_reasons: 5,
        }
    }
}

impl AnalyticsSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            insight_timeout: Duration::from_secs(config.insight_timeout_secs),
            ..Self::default()
        }
    }
}
