use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub brands_path: PathBuf,
    /// API key for the qualitative-insight provider. When absent the
    /// analytics suite runs with template fallbacks only.
    pub insight_api_key: Option<String>,
    pub insight_base_url: String,
    pub insight_model: String,
    pub insight_timeout_secs: u64,
    pub insight_max_tokens: u32,
    pub cache_ttl_hours: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field(
                "insight_api_key",
                &self.insight_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("insight_base_url", &self.insight_base_url)
            .field("insight_model", &self.insight_model)
            .field("insight_timeout_secs", &self.insight_timeout_secs)
            .field("insight_max_tokens", &self.insight_max_tokens)
            .field("cache_ttl_hours", &self.cache_ttl_hours)
            .finish()
    }
}
