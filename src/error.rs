//! Error type shared by the fetcher, the configuration loader and the HTTP layer.
//!
//! Only a missing query parameter is reported to the caller as a client error.
//! Every other failure is collapsed into a `200` response carrying an empty
//! article list and an `error` message, so frontend consumers never need a
//! special error branch for the news endpoint.

use axum::{
    Json,
    http::{StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::SearchResponse;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("upstream feed returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        match self {
            NewsError::MissingParameter(_) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": self.to_string() })),
            )
                .into_response(),
            other => (
                StatusCode::OK,
                [(CACHE_CONTROL, "no-store")],
                Json(SearchResponse::failed(other.to_string())),
            )
                .into_response(),
        }
    }
}
