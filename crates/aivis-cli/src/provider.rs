//! Insight provider selection for the analytics commands.

use aivis_analytics::{
    CachingProvider, HttpInsightProvider, InsightError, InsightProvider, QueryCache,
    UnavailableProvider,
};
use aivis_core::AppConfig;

/// The HTTP provider behind a response cache when an API key is configured,
/// otherwise the always-unavailable provider.
pub(crate) enum CliProvider {
    Http(CachingProvider<HttpInsightProvider>),
    Unavailable(UnavailableProvider),
}

impl CliProvider {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(http) = HttpInsightProvider::from_config(config)? else {
            tracing::info!("no insight API key configured, using template insights");
            return Ok(Self::Unavailable(UnavailableProvider));
        };
        let model = http.model().to_string();
        tracing::info!(model = %model, "using HTTP insight provider");
        Ok(Self::Http(CachingProvider::new(
            http,
            QueryCache::new(config.cache_ttl_hours),
            &model,
        )))
    }
}

impl InsightProvider for CliProvider {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        match self {
            Self::Http(provider) => provider.generate(prompt).await,
            Self::Unavailable(provider) => provider.generate(prompt).await,
        }
    }
}
