use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("AIVIS_ENV", "development"))?;
    let log_level = or_default("AIVIS_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default("AIVIS_BRANDS_PATH", "./config/brands.yaml"));

    let insight_api_key = lookup("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let insight_base_url = or_default("AIVIS_INSIGHT_BASE_URL", "https://api.openai.com/v1");
    let insight_model = or_default("AIVIS_INSIGHT_MODEL", "gpt-4");
    let insight_timeout_secs = parse_u64("AIVIS_INSIGHT_TIMEOUT_SECS", "20")?;
    let insight_max_tokens = parse_u32("AIVIS_INSIGHT_MAX_TOKENS", "200")?;
    let cache_ttl_hours = parse_u64("AIVIS_CACHE_TTL_HOURS", "24")?;

    if insight_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AIVIS_INSIGHT_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        brands_path,
        insight_api_key,
        insight_base_url,
        insight_model,
        insight_timeout_secs,
        insight_max_tokens,
        cache_ttl_hours,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AIVIS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
