//! Resolve `--brand` into a profile, falling back to an ad-hoc one when the
//! brands file is missing or has no matching entry.

use std::sync::Arc;

use aivis_core::{AppConfig, BrandProfile};
use aivis_extract::{Analyzer, GazetteerRecognizer};

const DEFAULT_INDUSTRY: &str = "Meal Kit";

/// Find `name` in the configured brands file.
///
/// A missing or unreadable brands file is not fatal for ad-hoc runs; it is
/// logged and treated as empty.
pub(crate) fn resolve_profile(
    config: &AppConfig,
    name: &str,
    industry: Option<&str>,
) -> BrandProfile {
    let found = match aivis_core::load_brands(&config.brands_path) {
        Ok(file) => file.find(name).cloned(),
        Err(e) => {
            tracing::debug!(
                path = %config.brands_path.display(),
                error = %e,
                "brands file not loaded, using ad-hoc profile"
            );
            None
        }
    };

    let mut profile = found.unwrap_or_else(|| {
        BrandProfile::new(name.trim(), industry.unwrap_or(DEFAULT_INDUSTRY))
    });
    if let Some(industry) = industry {
        profile.industry = industry.trim().to_string();
    }
    profile
}

/// Analyzer for `profile`, with its known competitors as a gazetteer when
/// the profile lists any.
///
/// # Errors
///
/// Returns an error if the brand name is blank.
pub(crate) fn analyzer_for(profile: &BrandProfile) -> anyhow::Result<Analyzer> {
    let analyzer = Analyzer::new(profile.identity()?);
    if profile.known_competitors.is_empty() {
        return Ok(analyzer);
    }
    let gazetteer = GazetteerRecognizer::new(&profile.known_competitors);
    Ok(analyzer.with_recognizer(Arc::new(gazetteer)))
}
