use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Reads configuration from the process environment only; no `.env` loading.
fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected. Kept
/// separate from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got '{raw}'")))
    };

    let log_level = or_default("SIZEWATCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SIZEWATCH_REQUEST_TIMEOUT_SECS", "25")?;
    let user_agent = or_default("SIZEWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("SIZEWATCH_ACCEPT_LANGUAGE", "en-US,en;q=0.9");
    let max_retries = parse_u32("SIZEWATCH_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("SIZEWATCH_RETRY_BACKOFF_BASE_SECS", "1")?;

    let max_concurrent_checks = parse_usize("SIZEWATCH_MAX_CONCURRENT_CHECKS", "2")?;
    if max_concurrent_checks == 0 {
        return Err(invalid(
            "SIZEWATCH_MAX_CONCURRENT_CHECKS",
            "must be at least 1".to_string(),
        ));
    }

    let enable_embedded_blob_scan = parse_flag("SIZEWATCH_EMBEDDED_BLOB_SCAN", "true")?;
    let max_script_bytes = parse_usize("SIZEWATCH_MAX_SCRIPT_BYTES", "5242880")?;

    // An empty value is treated the same as an unset one.
    let webhook_url = lookup("SIZEWATCH_WEBHOOK_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let webhook_username = or_default("SIZEWATCH_WEBHOOK_USERNAME", "Stock Monitor");
    let webhook_timeout_secs = parse_u64("SIZEWATCH_WEBHOOK_TIMEOUT_SECS", "10")?;

    let watchlist_path = PathBuf::from(or_default(
        "SIZEWATCH_WATCHLIST_PATH",
        "./config/watchlist.yaml",
    ));

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        accept_language,
        max_retries,
        retry_backoff_base_secs,
        max_concurrent_checks,
        enable_embedded_blob_scan,
        max_script_bytes,
        webhook_url,
        webhook_username,
        webhook_timeout_secs,
        watchlist_path,
    })
}

/// Parse a boolean env value. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
