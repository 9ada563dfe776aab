use std::sync::Arc;

use crate::{config::NewsConfig, error::NewsError, upstream::FeedClient};

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub config: Arc<NewsConfig>,
    pub feed: FeedClient,
}

impl AppState {
    pub fn new(config: NewsConfig) -> Result<Arc<Self>, NewsError> {
        config.validate()?;
        let config = Arc::new(config);
        let feed = FeedClient::new(Arc::clone(&config))?;

        Ok(Arc::new(Self { config, feed }))
    }
}
