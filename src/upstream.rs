//! Upstream RSS search client.
//!
//! One GET per search, no retries. Requests carry a browser-like user agent
//! and are bounded by the configured timeout.

use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::utils::{millis, truncate_for_log};

/// HTTP client for the RSS search feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    config: Arc<NewsConfig>,
}

impl FeedClient {
    /// Build a client with the configured user agent and timeout.
    pub fn new(config: Arc<NewsConfig>) -> Result<Self, NewsError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// The user's query with the configured context suffix appended.
    pub fn effective_query(&self, query: &str) -> String {
        format!("{}{}", query, self.config.query_suffix)
    }

    /// Full upstream URL for an effective query.
    ///
    /// The query is percent-encoded with spaces as `%20`:
    /// `Golden Hour Studios Goa wedding` becomes
    /// `q=Golden%20Hour%20Studios%20Goa%20wedding`.
    pub fn search_url(&self, effective_query: &str) -> String {
        let locale = &self.config.locale;
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.config.upstream_base_url,
            urlencoding::encode(effective_query),
            locale.hl,
            locale.gl,
            locale.ceid
        )
    }

    /// Fetch the raw feed body for an effective query.
    ///
    /// # Errors
    ///
    /// [`NewsError::UpstreamStatus`] for a non-success status and
    /// [`NewsError::Http`] for transport failures and timeouts.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_feed(&self, effective_query: &str) -> Result<String, NewsError> {
        let url = self.search_url(effective_query);
        let t0 = Instant::now();

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                %url,
                %status,
                elapsed_ms = millis(t0.elapsed()),
                "Upstream feed returned non-success status"
            );
            return Err(NewsError::UpstreamStatus(status));
        }

        let body = response.text().await?;
        info!(
            %status,
            bytes = body.len(),
            elapsed_ms = millis(t0.elapsed()),
            "Fetched upstream feed"
        );
        debug!(preview = %truncate_for_log(&body, 200), "Upstream body");
        Ok(body)
    }
}
