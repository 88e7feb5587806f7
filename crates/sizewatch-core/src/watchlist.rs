use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One product page and the size label to watch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    /// Optional display name used in logs.
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
    /// Visible size label, e.g. `"Large"` or `"L"`.
    pub size: String,
}

impl WatchEntry {
    /// Name used in log lines: the configured name, or the URL.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchlistFile {
    pub watches: Vec<WatchEntry>,
}

/// Load and validate a watchlist from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watchlist(path: &Path) -> Result<WatchlistFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let watchlist: WatchlistFile =
        serde_yaml::from_str(&content).map_err(ConfigError::WatchlistParse)?;

    validate_watchlist(&watchlist)?;

    Ok(watchlist)
}

fn validate_watchlist(watchlist: &WatchlistFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &watchlist.watches {
        let url = entry.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "watch url must be non-empty".to_string(),
            ));
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "watch url '{url}' must start with http:// or https://"
            )));
        }

        if entry.size.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "watch for '{url}' has an empty size label"
            )));
        }

        let key = (url.to_string(), entry.size.trim().to_lowercase());
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate watch: size '{}' on '{url}'",
                entry.size
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, size: &str) -> WatchEntry {
        WatchEntry {
            name: None,
            url: url.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn label_prefers_name() {
        let mut e = entry("https://shop.example/p/1", "L");
        assert_eq!(e.label(), "https://shop.example/p/1");
        e.name = Some("hoodie".to_string());
        assert_eq!(e.label(), "hoodie");
    }

    #[test]
    fn parses_yaml_with_optional_name() {
        let yaml = r"
watches:
  - name: Fleece hoodie
    url: https://shop.example/products/hoodie
    size: Large
  - url: https://shop.example/products/tee
    size: M
";
        let file: WatchlistFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.watches.len(), 2);
        assert_eq!(file.watches[0].name.as_deref(), Some("Fleece hoodie"));
        assert!(file.watches[1].name.is_none());
        assert!(validate_watchlist(&file).is_ok());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let file = WatchlistFile {
            watches: vec![entry("ftp://shop.example/p", "L")],
        };
        let err = validate_watchlist(&file).unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn validate_rejects_blank_size() {
        let file = WatchlistFile {
            watches: vec![entry("https://shop.example/p", "  ")],
        };
        let err = validate_watchlist(&file).unwrap_err();
        assert!(err.to_string().contains("empty size label"));
    }

    #[test]
    fn validate_rejects_duplicate_size_case_insensitive() {
        let file = WatchlistFile {
            watches: vec![
                entry("https://shop.example/p", "Large"),
                entry("https://shop.example/p", "large"),
            ],
        };
        let err = validate_watchlist(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate watch"));
    }

    #[test]
    fn validate_allows_same_url_different_sizes() {
        let file = WatchlistFile {
            watches: vec![
                entry("https://shop.example/p", "S"),
                entry("https://shop.example/p", "M"),
            ],
        };
        assert!(validate_watchlist(&file).is_ok());
    }

    #[test]
    fn load_watchlist_reports_missing_file() {
        let err = load_watchlist(Path::new("/nonexistent/watchlist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::WatchlistIo { .. }));
    }

    #[test]
    fn shipped_watchlist_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/watchlist.yaml");
        let file = load_watchlist(&path).unwrap();
        assert!(!file.watches.is_empty());
    }
}
