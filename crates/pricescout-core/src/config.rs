use crate::app_config::AppConfig;
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

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a plain `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let serpapi_api_key = require("SERPAPI_API_KEY")?;

    let bind_addr = parse_addr("PRICESCOUT_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("PRICESCOUT_LOG_LEVEL", "info");

    let scraper_request_timeout_secs =
        parse_u64("PRICESCOUT_SCRAPER_REQUEST_TIMEOUT_SECS", "20")?;
    let scraper_max_concurrent_fetches =
        parse_usize("PRICESCOUT_SCRAPER_MAX_CONCURRENT_FETCHES", "16")?;

    let similarity_threshold = {
        let var = "PRICESCOUT_SIMILARITY_THRESHOLD";
        let raw = or_default(var, "0.3");
        let value = raw
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is outside [0.0, 1.0]"),
            });
        }
        value
    };

    let discovery_timeout_secs = parse_u64("PRICESCOUT_DISCOVERY_TIMEOUT_SECS", "15")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        serpapi_api_key,
        scraper_request_timeout_secs,
        scraper_max_concurrent_fetches,
        similarity_threshold,
        discovery_timeout_secs,
    })
}
