//! Qualitative-insight collaborator.
//!
//! The analytics suite asks a provider for short free-text commentary
//! (gap reasons, competitor strategy, tagline ratings). Every call goes
//! through [`generate_or_fallback`], which bounds it with a timeout and
//! substitutes a literal fallback on any failure.

use std::future::Future;
use std::time::Duration;

use crate::error::InsightError;

/// Source of free-text strategic commentary.
pub trait InsightProvider: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError`] when the provider cannot produce text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// Provider used when no API key is configured. Always fails, so callers
/// always take their fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

impl InsightProvider for UnavailableProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        Err(InsightError::Unavailable)
    }
}

/// Run `provider` with a hard timeout, returning `fallback` on timeout,
/// error, or blank output. Failures are logged and never propagated.
pub async fn generate_or_fallback<P: InsightProvider>(
    provider: &P,
    prompt: &str,
    timeout: Duration,
    fallback: String,
) -> String {
    match tokio::time::timeout(timeout, provider.generate(prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => {
            tracing::warn!("insight provider returned empty text, using fallback");
            fallback
        }
        Ok(Err(InsightError::Unavailable)) => {
            tracing::debug!("insight provider unavailable, using fallback");
            fallback
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "insight provider failed, using fallback");
            fallback
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "insight provider timed out, using fallback"
            );
            fallback
        }
    }
}
