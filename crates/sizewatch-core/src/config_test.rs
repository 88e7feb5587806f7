use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("true"), Some(true));
    assert_eq!(parse_bool("YES"), Some(true));
    assert_eq!(parse_bool(" 1 "), Some(true));
    assert_eq!(parse_bool("off"), Some(false));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 25);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.accept_language, "en-US,en;q=0.9");
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert_eq!(cfg.max_concurrent_checks, 2);
    assert!(cfg.enable_embedded_blob_scan);
    assert_eq!(cfg.max_script_bytes, 5_242_880);
    assert!(cfg.webhook_url.is_none());
    assert_eq!(cfg.webhook_username, "Stock Monitor");
    assert_eq!(cfg.webhook_timeout_secs, 10);
    assert_eq!(
        cfg.watchlist_path,
        std::path::PathBuf::from("./config/watchlist.yaml")
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_LOG_LEVEL", "debug");
    map.insert("SIZEWATCH_REQUEST_TIMEOUT_SECS", "60");
    map.insert("SIZEWATCH_EMBEDDED_BLOB_SCAN", "no");
    map.insert("SIZEWATCH_WEBHOOK_URL", "https://discord.example/api/webhooks/1/abc");
    map.insert("SIZEWATCH_MAX_CONCURRENT_CHECKS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 60);
    assert!(!cfg.enable_embedded_blob_scan);
    assert_eq!(cfg.max_concurrent_checks, 4);
    assert_eq!(
        cfg.webhook_url.as_deref(),
        Some("https://discord.example/api/webhooks/1/abc")
    );
}

#[test]
fn build_app_config_treats_blank_webhook_as_unset() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_WEBHOOK_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.webhook_url.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SIZEWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SIZEWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_flag() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_EMBEDDED_BLOB_SCAN", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SIZEWATCH_EMBEDDED_BLOB_SCAN"),
        "expected InvalidEnvVar(SIZEWATCH_EMBEDDED_BLOB_SCAN), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_MAX_CONCURRENT_CHECKS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SIZEWATCH_MAX_CONCURRENT_CHECKS"),
        "expected InvalidEnvVar(SIZEWATCH_MAX_CONCURRENT_CHECKS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_negative_retries() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SIZEWATCH_MAX_RETRIES"),
        "expected InvalidEnvVar(SIZEWATCH_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_webhook_url() {
    let mut map = HashMap::new();
    map.insert("SIZEWATCH_WEBHOOK_URL", "https://hooks.example/secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("[redacted]"));
}
