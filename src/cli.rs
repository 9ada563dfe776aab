//! Command-line interface definitions for Vendor News.
//!
//! All arguments can be provided via command-line flags or environment
//! variables. Flags override values from the optional YAML config file, which
//! in turn overrides the built-in defaults.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use crate::config::NewsConfig;
use crate::error::NewsError;

/// Command-line arguments for the news proxy.
///
/// # Examples
///
/// ```sh
/// # Defaults: 0.0.0.0:8788, Google News, " Goa wedding" suffix
/// vendor_news
///
/// # Custom config file and port
/// vendor_news --config ./news.yaml --port 9000
///
/// # Different region
/// vendor_news --query-suffix " Udaipur wedding"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_CONFIG")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "NEWS_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "NEWS_PORT", default_value_t = 8788)]
    pub port: u16,

    /// RSS search endpoint
    #[arg(long, env = "NEWS_UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    /// Context appended to every query
    #[arg(long, env = "NEWS_QUERY_SUFFIX", allow_hyphen_values = true)]
    pub query_suffix: Option<String>,

    /// Maximum number of articles per response
    #[arg(long, env = "NEWS_MAX_ARTICLES")]
    pub max_articles: Option<usize>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "NEWS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Resolve the effective configuration: defaults, then file, then flags.
    pub fn load_config(&self) -> Result<NewsConfig, NewsError> {
        let mut config = match &self.config {
            Some(path) => NewsConfig::from_yaml_file(path)?,
            None => NewsConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut NewsConfig) {
        if let Some(url) = &self.upstream_url {
            config.upstream_base_url = url.clone();
        }
        if let Some(suffix) = &self.query_suffix {
            config.query_suffix = suffix.clone();
        }
        if let Some(max) = self.max_articles {
            config.max_articles = max;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
    }
}
