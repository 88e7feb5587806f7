//! HTTP client for fetching product pages.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// Used when a 429 carries no parseable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Fetches product page markup.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient failures (429, 5xx, network errors) are retried
/// with exponential backoff up to `max_retries` additional attempts.
pub struct PageClient {
    client: Client,
    accept_language: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeout, `User-Agent`,
    /// `Accept-Language`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            accept_language: accept_language.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the markup of `url`, retrying transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] — `url` is not an absolute http(s) URL.
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status (5xx retried).
    /// - [`ScraperError::Http`] — network or TLS failure after all retries exhausted.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let page_url = Self::page_url(url)?;
        let domain = page_url.host_str().unwrap_or(url).to_owned();

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let page_url = page_url.clone();
            let domain = domain.clone();
            async move {
                let response = self
                    .client
                    .get(page_url.clone())
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ScraperError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: page_url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: page_url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches `url`, returning an empty string on any failure.
    ///
    /// Failures are logged at `warn`; callers treat empty markup as "fetch
    /// failed" without handling errors themselves.
    pub async fn fetch_or_empty(&self, url: &str) -> String {
        match self.fetch_page(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed");
                String::new()
            }
        }
    }

    /// Parses and validates a page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `url` does not parse or is not
    /// http(s).
    fn page_url(url: &str) -> Result<Url, ScraperError> {
        let parsed = Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
