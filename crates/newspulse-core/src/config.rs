use crate::app_config::{
    PipelineConfig, DEFAULT_ARTICLES_PER_QUERY, DEFAULT_FEED_BASE_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load pipeline configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_pipeline_config() -> Result<PipelineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_pipeline_config_from_env()
}

/// Load pipeline configuration from environment variables already in the process.
///
/// Unlike [`load_pipeline_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_pipeline_config_from_env() -> Result<PipelineConfig, ConfigError> {
    build_pipeline_config(|key| std::env::var(key))
}

/// Build pipeline configuration using the provided env-var lookup function.
///
/// Every variable is optional. Decoupled from the real environment so tests
/// can drive it with a plain `HashMap`.
fn build_pipeline_config<F>(lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let log_level = or_default("NEWSPULSE_LOG_LEVEL", DEFAULT_LOG_LEVEL);
    let request_timeout_secs =
        parse_u64("NEWSPULSE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSPULSE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let user_agent = or_default("NEWSPULSE_USER_AGENT", DEFAULT_USER_AGENT);
    let articles_per_query =
        parse_usize("NEWSPULSE_ARTICLES_PER_QUERY", DEFAULT_ARTICLES_PER_QUERY)?;
    let max_concurrency = parse_usize("NEWSPULSE_MAX_CONCURRENCY", DEFAULT_MAX_CONCURRENCY)?.max(1);
    let feed_base_url = or_default("NEWSPULSE_FEED_BASE_URL", DEFAULT_FEED_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let tei_url = lookup("NEWSPULSE_TEI_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty());

    Ok(PipelineConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        articles_per_query,
        max_concurrency,
        feed_base_url,
        tei_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
