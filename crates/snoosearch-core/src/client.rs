//! HTTP client for fetching reddit HTML pages
//!
//! Every fetch is a single GET with `Accept: text/html`. Failures are
//! returned as-is; retry policy belongs to the caller.

use std::time::Duration;

use reqwest::header::{self, HeaderName};
use tracing::debug;

use crate::error::{RedditError, Result};
use crate::url::BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const PERMALINK_USER_AGENT: &str = concat!("snoosearch/", env!("CARGO_PKG_VERSION"));

/// Default "<author> ... <title>" separators found in permalink page titles
pub const DEFAULT_FALLBACK_DELIMITERS: &[&str] = &[" comments on ", " wrote a comment on "];

/// Configuration for the HTTP client and scraper
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search host (default: https://old.reddit.com)
    pub base_url: String,
    /// User-Agent for search requests
    pub user_agent: String,
    /// User-Agent identifying this library on permalink requests
    pub permalink_user_agent: String,
    /// Permalink fetch timeout in seconds (default: 30)
    pub permalink_timeout_secs: u64,
    /// Page title separators between author and post title, tried in order
    pub fallback_delimiters: Vec<String>,
    /// Capacity of a scraper-owned lookup cache (default: None, use the global cache)
    pub cache_capacity: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            permalink_user_agent: PERMALINK_USER_AGENT.to_string(),
            permalink_timeout_secs: 30,
            fallback_delimiters: DEFAULT_FALLBACK_DELIMITERS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            cache_capacity: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `SNOOSEARCH_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    ///
    /// Recognised keys: `SNOOSEARCH_BASE_URL`, `SNOOSEARCH_USER_AGENT`,
    /// `SNOOSEARCH_PERMALINK_TIMEOUT_SECS`. Blank or unparseable values are
    /// ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = get("SNOOSEARCH_BASE_URL") {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(user_agent) = get("SNOOSEARCH_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(timeout) = get("SNOOSEARCH_PERMALINK_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.permalink_timeout_secs = timeout;
        }

        config
    }

    pub fn permalink_timeout(&self) -> Duration {
        Duration::from_secs(self.permalink_timeout_secs)
    }
}

/// Per-request fetch settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Ask every cache on the way to revalidate (default: true)
    pub bypass_cache: bool,
    /// Extra headers, replacing client defaults of the same name
    pub headers: Vec<(HeaderName, String)>,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            bypass_cache: true,
            headers: Vec::new(),
            timeout: None,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn allow_cache(mut self) -> Self {
        self.bypass_cache = false;
        self
    }
}

/// HTTP client wrapper
///
/// Holds no response cache of its own; whether upstream caches may answer
/// is decided per request by [`FetchOptions::bypass_cache`].
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: reqwest::Client,
}

impl RedditClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(RedditError::Transport)?;

        Ok(Self { client })
    }

    /// Fetch a page and return its raw bytes
    ///
    /// # Errors
    /// - `Transport` - Network failure or non-success HTTP status
    /// - `EmptyBody` - The response carried no bytes
    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html");

        if options.bypass_cache {
            request = request
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::PRAGMA, "no-cache");
        }

        for (name, value) in &options.headers {
            request = request.header(name.clone(), value.as_str());
        }

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let response = response.error_for_status()?;
        let body = response.bytes().await?;

        debug!(url, %status, bytes = body.len(), "fetched page");

        if body.is_empty() {
            return Err(RedditError::EmptyBody(url.to_string()));
        }

        Ok(body.to_vec())
    }
}
