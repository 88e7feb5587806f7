use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub max_concurrent_checks: usize,
    pub enable_embedded_blob_scan: bool,
    pub max_script_bytes: usize,
    pub webhook_url: Option<String>,
    pub webhook_username: String,
    pub webhook_timeout_secs: u64,
    pub watchlist_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("accept_language", &self.accept_language)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("max_concurrent_checks", &self.max_concurrent_checks)
            .field("enable_embedded_blob_scan", &self.enable_embedded_blob_scan)
            .field("max_script_bytes", &self.max_script_bytes)
            // Webhook URLs embed their auth token.
            .field(
                "webhook_url",
                &self.webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("webhook_username", &self.webhook_username)
            .field("webhook_timeout_secs", &self.webhook_timeout_secs)
            .field("watchlist_path", &self.watchlist_path)
            .finish()
    }
}
