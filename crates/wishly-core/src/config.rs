use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Browser user-agent sent with product page fetches. Many storefronts serve
/// stripped-down or blocked pages to non-browser agents.
pub const DEFAULT_SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("WISHLY_ENV", "development"))?;

    let bind_addr = or_default("WISHLY_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("WISHLY_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("WISHLY_LOG_LEVEL", "info");

    let scraper_timeout_secs = or_default("WISHLY_SCRAPER_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("WISHLY_SCRAPER_TIMEOUT_SECS", e.to_string()))?;
    if scraper_timeout_secs == 0 {
        return Err(invalid(
            "WISHLY_SCRAPER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let scraper_user_agent = or_default("WISHLY_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);

    let scrape_rate_limit_per_minute = or_default("WISHLY_SCRAPE_RATE_LIMIT_PER_MINUTE", "30")
        .parse::<usize>()
        .map_err(|e| invalid("WISHLY_SCRAPE_RATE_LIMIT_PER_MINUTE", e.to_string()))?;

    let cors_origins = or_default("WISHLY_CORS_ORIGINS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scraper_timeout_secs,
        scraper_user_agent,
        scrape_rate_limit_per_minute,
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WISHLY_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
