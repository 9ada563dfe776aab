//! Runtime configuration for the news proxy.
//!
//! Every constant the search flow depends on (upstream URL, query suffix,
//! locale, result cap, fallback source label, description length, cache
//! lifetime) lives in [`NewsConfig`] so tests and deployments can override it.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then the
//! command-line / environment overrides applied in [`crate::cli`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

use crate::error::NewsError;

/// Locale parameters appended to every upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Locale {
    /// Interface language, e.g. `en-IN`.
    pub hl: String,
    /// Country of the edition, e.g. `IN`.
    pub gl: String,
    /// Combined edition id, e.g. `IN:en`.
    pub ceid: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            hl: "en-IN".to_string(),
            gl: "IN".to_string(),
            ceid: "IN:en".to_string(),
        }
    }
}

/// Named configuration values for the search flow.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// query_suffix: " Goa wedding"
/// max_articles: 10
/// locale:
///   hl: en-IN
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsConfig {
    /// RSS search endpoint; the query string is appended to it.
    pub upstream_base_url: String,
    /// Context appended to the caller's query before searching.
    pub query_suffix: String,
    pub locale: Locale,
    /// Upper bound on returned articles.
    pub max_articles: usize,
    /// Source label used when a title carries no `" - Source"` suffix.
    pub fallback_source: String,
    /// Description length cap, in characters.
    pub description_max_chars: usize,
    /// User agent sent upstream.
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// `max-age` of the `Cache-Control` header on successful responses.
    pub cache_max_age_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: "https://news.google.com/rss/search".to_string(),
            query_suffix: " Goa wedding".to_string(),
            locale: Locale::default(),
            max_articles: 10,
            fallback_source: "Google News".to_string(),
            description_max_chars: 200,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            request_timeout_secs: 10,
            cache_max_age_secs: 1800,
        }
    }
}

impl NewsConfig {
    /// Load a configuration from a YAML file, filling missing keys with defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, NewsError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&raw)?;
        info!("Loaded configuration file");
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, NewsError> {
        let config: NewsConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would otherwise fail at request time.
    pub fn validate(&self) -> Result<(), NewsError> {
        let url = Url::parse(&self.upstream_base_url).map_err(|e| {
            NewsError::InvalidConfig(format!(
                "upstream_base_url {:?} is not a valid URL: {e}",
                self.upstream_base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NewsError::InvalidConfig(format!(
                "upstream_base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.max_articles == 0 {
            return Err(NewsError::InvalidConfig(
                "max_articles must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(NewsError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Value of the `Cache-Control` header for successful searches.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_secs)
    }
}
