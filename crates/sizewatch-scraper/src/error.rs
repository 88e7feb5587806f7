use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A structured-data fragment that could not be decoded as JSON.
///
/// Decode failures are local to one fragment; the pipeline drops the
/// fragment and keeps going with the rest of the page.
#[derive(Debug, Error)]
#[error("could not decode {origin}: {source}")]
pub struct DecodeError {
    /// Where the fragment came from, e.g. `ld+json block 2`.
    pub origin: String,
    #[source]
    pub source: serde_json::Error,
}
