//! Data models for feed items and the articles returned to the frontend.
//!
//! - [`FeedItem`]: raw fields of one `<item>` block as found upstream
//! - [`NewsArticle`]: the normalized article served by the search endpoint
//! - [`SearchResponse`]: the JSON body of the search endpoint
//!
//! [`NewsArticle`] uses camelCase field names to match the JSON consumed by
//! the frontend, hence the `#[allow(non_snake_case)]` attribute.

use serde::{Deserialize, Serialize};

/// One `<item>` block as extracted from the RSS document.
///
/// Missing elements are left as empty strings, except `description`, which
/// stays `None` so an absent description can be told apart from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    /// Combined `"Title - Source"` string.
    pub title: String,
    pub link: String,
    pub pub_date: String,
    /// Description markup, entities already resolved.
    pub description: Option<String>,
    /// URL from `<media:content>`, `<media:thumbnail>` or an image `<enclosure>`.
    pub media_url: Option<String>,
}

/// A normalized news article.
///
/// Articles exist only for the duration of one request; nothing is persisted.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsArticle {
    /// Headline with the trailing source segment removed.
    pub title: String,
    /// Absolute article URL.
    pub link: String,
    /// Publication date exactly as the feed reported it.
    pub publicationDate: String,
    /// Publisher name, or the configured fallback label.
    pub source: String,
    /// Plain-text description, length capped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Best-effort image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of `GET /api/news/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResponse {
    pub articles: Vec<NewsArticle>,
    /// Effective query sent upstream (user query plus suffix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn found(articles: Vec<NewsArticle>, query: impl Into<String>) -> Self {
        Self {
            articles,
            query: Some(query.into()),
            error: None,
        }
    }

    /// An empty result annotated with the failure that caused it.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            query: None,
            error: Some(error.into()),
        }
    }
}
