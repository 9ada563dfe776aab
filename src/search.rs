//! The news search flow: effective query, one upstream fetch, extraction.

use tracing::{info, instrument, warn};

use crate::error::NewsError;
use crate::feed::parse_articles;
use crate::models::NewsArticle;
use crate::upstream::FeedClient;

/// Result of a search that reached the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Query actually sent upstream.
    pub query: String,
    pub articles: Vec<NewsArticle>,
    /// `false` when upstream answered with a non-success status and the
    /// article list was left empty.
    pub upstream_ok: bool,
}

/// Run one search for a validated, non-empty query.
///
/// A non-success upstream status yields an ordinary empty outcome rather than
/// an error. Transport failures are returned as errors and turned
/// into an annotated empty response by the HTTP layer.
#[instrument(level = "info", skip(client))]
pub async fn search_news(client: &FeedClient, query: &str) -> Result<SearchOutcome, NewsError> {
    let effective = client.effective_query(query);

    let body = match client.fetch_feed(&effective).await {
        Ok(body) => body,
        Err(NewsError::UpstreamStatus(status)) => {
            warn!(%status, "Returning empty article list for failed upstream");
            return Ok(SearchOutcome {
                query: effective,
                articles: Vec::new(),
                upstream_ok: false,
            });
        }
        Err(e) => return Err(e),
    };

    let articles = parse_articles(&body, client.config());
    info!(count = articles.len(), "Search complete");

    Ok(SearchOutcome {
        query: effective,
        articles,
        upstream_ok: true,
    })
}
