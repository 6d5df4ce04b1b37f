use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.zippopotam.us";
pub const DEFAULT_AFFILIATE_BASE: &str = "https://ticketmaster.evyy.net/c/6786771/264167/4272";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
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
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("MANTRA_ENV", "development"));
    let bind_addr = parse_addr("MANTRA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MANTRA_LOG_LEVEL", "info");

    let ticketmaster_api_key = lookup("TICKETMASTER_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let ticketmaster_base_url =
        non_empty("MANTRA_TICKETMASTER_BASE_URL", DEFAULT_TICKETMASTER_BASE_URL)?;
    let geocode_base_url = non_empty("MANTRA_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL)?;
    let affiliate_base = non_empty("MANTRA_AFFILIATE_BASE", DEFAULT_AFFILIATE_BASE)?;
    let country_code = non_empty("MANTRA_COUNTRY_CODE", "US")?.to_uppercase();

    let http_timeout_secs = parse_u64("MANTRA_HTTP_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("MANTRA_USER_AGENT", "mantra/0.1 (show-discovery)");
    let geocode_cache_ttl_secs = parse_u64("MANTRA_GEOCODE_CACHE_TTL_SECS", "86400")?;
    let events_cache_ttl_secs = parse_u64("MANTRA_EVENTS_CACHE_TTL_SECS", "21600")?;

    let content_dir = PathBuf::from(or_default("MANTRA_CONTENT_DIR", "./data"));
    let prefs_path = PathBuf::from(or_default("MANTRA_PREFS_PATH", "./.mantra-prefs.json"));
    let api_base = non_empty("MANTRA_API_BASE", "http://127.0.0.1:3000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        ticketmaster_api_key,
        ticketmaster_base_url,
        geocode_base_url,
        affiliate_base,
        country_code,
        http_timeout_secs,
        user_agent,
        geocode_cache_ttl_secs,
        events_cache_ttl_secs,
        content_dir,
        prefs_path,
        api_base,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
