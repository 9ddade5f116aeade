use std::time::Duration;

use crate::app_config::{AppConfig, Environment, DEFAULT_LIVE_SEARCH_SCRIPT_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Zero disables the deadline.
    let parse_wait = |var: &str, default: &str| -> Result<Option<Duration>, ConfigError> {
        let secs = parse_u64(var, default)?;
        Ok((secs > 0).then(|| Duration::from_secs(secs)))
    };

    let storefront_url = require("VENIA_STOREFRONT_URL")?;
    if !(storefront_url.starts_with("http://") || storefront_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "VENIA_STOREFRONT_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{storefront_url}'"),
        });
    }

    let env = parse_environment(&or_default("VENIA_ENV", "development"))?;
    let log_level = or_default("VENIA_LOG_LEVEL", "info");
    let graphql_path = or_default("VENIA_GRAPHQL_PATH", "/api/graphql");
    let http_timeout_secs = parse_u64("VENIA_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VENIA_USER_AGENT", "venia-storefront/0.1 (bootstrap)");
    let live_search_script_url =
        or_default("VENIA_LIVE_SEARCH_SCRIPT_URL", DEFAULT_LIVE_SEARCH_SCRIPT_URL);
    let widget_wait_timeout = parse_wait("VENIA_WIDGET_WAIT_TIMEOUT_SECS", "30")?;
    let analytics_wait_timeout = parse_wait("VENIA_ANALYTICS_WAIT_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        storefront_url,
        env,
        log_level,
        graphql_path,
        http_timeout_secs,
        user_agent,
        live_search_script_url,
        widget_wait_timeout,
        analytics_wait_timeout,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VENIA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
