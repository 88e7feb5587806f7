pub mod app_config;
pub mod config;
pub mod verdict;
pub mod watchlist;

pub use app_config::AppConfig;
pub use config::load_app_config;
pub use verdict::{StockCheck, Verdict};
pub use watchlist::{load_watchlist, WatchEntry, WatchlistFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watchlist file {path}: {source}")]
    WatchlistIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse watchlist file: {0}")]
    WatchlistParse(#[source] serde_yaml::Error),

    #[error("watchlist validation failed: {0}")]
    Validation(String),
}
