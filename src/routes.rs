use std::sync::Arc;

use axum::{
    Json,
    extract::{RawQuery, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::{error::NewsError, models::SearchResponse, search::search_news, state::AppState};

/// First value of `name` in a raw query string. Later repeats are ignored.
fn first_param(raw: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(raw?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// `GET /api/news/search?q=<text>`
///
/// A missing or blank `q` is the only client error. When `q` is repeated the
/// first occurrence is used. Every 200 carries the configured cache header.
#[instrument(level = "info", skip_all, fields(raw_query = raw.as_deref().unwrap_or_default()))]
pub async fn news_search_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, NewsError> {
    let q = first_param(raw.as_deref(), "q");
    let query = q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(NewsError::MissingParameter("q"))?;

    let outcome = search_news(&state.feed, query).await?;
    debug!(
        count = outcome.articles.len(),
        upstream_ok = outcome.upstream_ok,
        "Responding to search"
    );

    Ok((
        [(CACHE_CONTROL, state.config.cache_control())],
        Json(SearchResponse::found(outcome.articles, outcome.query)),
    )
        .into_response())
}

pub async fn health_handler() -> &'static str {
    "ok"
}
