//! Main scraper API for reddit search
//!
//! Provides the high-level API combining HTTP client, parsers and the
//! permalink lookup cache.

use std::sync::Arc;

use reqwest::header;
use tracing::debug;

use crate::cache::AuthorshipCache;
use crate::client::{ClientConfig, FetchOptions, RedditClient};
use crate::error::Result;
use crate::parser::{parse_document, parse_permalink_page, search::parse_search_results};
use crate::types::{CachedAuthorship, MixedResult, SearchQuery, SortOption, TopRange};
use crate::url::{build_search_url, parse_permalink};

/// Main scraper API
///
/// Each call issues at most one request and never retries. Clones share the
/// HTTP connection pool and the lookup cache.
#[derive(Debug, Clone)]
pub struct RedditScraper {
    client: RedditClient,
    config: ClientConfig,
    cache: Arc<AuthorshipCache>,
}

impl RedditScraper {
    /// Create a new scraper with default configuration and the global cache
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom configuration
    ///
    /// Uses a private cache when `config.cache_capacity` is set, the global
    /// cache otherwise.
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let cache = match config.cache_capacity {
            Some(capacity) => Arc::new(AuthorshipCache::with_capacity(capacity)),
            None => AuthorshipCache::global(),
        };
        Self::with_cache(config, cache)
    }

    /// Create a new scraper sharing the given lookup cache
    pub fn with_cache(config: ClientConfig, cache: Arc<AuthorshipCache>) -> Result<Self> {
        let client = RedditClient::with_config(&config)?;
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<AuthorshipCache> {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search and extract the records the query's filter asks for
    ///
    /// An empty list is a successful search with no matches.
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is blank
    /// - `Transport` / `EmptyBody` if the fetch fails
    /// - `Decode` / `MalformedMarkup` if the response is not HTML
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> snoosearch_core::Result<()> {
    /// use snoosearch_core::{RedditScraper, SearchQuery};
    /// let scraper = RedditScraper::new()?;
    /// for result in scraper.search(&SearchQuery::posts("rust async")).await? {
    ///     if let Some(post) = result.as_post() {
    ///         println!("r/{}: {}", post.subreddit, post.title);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<MixedResult>> {
        let url = build_search_url(&self.config.base_url, query)?;
        let bytes = self.client.fetch(&url, &FetchOptions::default()).await?;
        let results = extract_search_results(bytes, query)?;
        debug!(%url, count = results.len(), "search complete");
        Ok(results)
    }

    /// Search with string-typed options as they arrive from a frontend
    ///
    /// # Errors
    /// `InvalidQuery` for an unknown sort or top range, plus everything
    /// [`RedditScraper::search`] returns
    pub async fn search_with(
        &self,
        text: &str,
        search_type: &str,
        sort: &str,
        top_range: &str,
        include_adult: bool,
    ) -> Result<Vec<MixedResult>> {
        let query = SearchQuery::new(
            text,
            search_type,
            sort.parse::<SortOption>()?,
            top_range.parse::<TopRange>()?,
            include_adult,
        );
        self.search(&query).await
    }

    /// Recover title and author for a permalink
    ///
    /// Served from the lookup cache when present; otherwise fetched with the
    /// identifying user agent and permalink timeout, then cached.
    ///
    /// # Errors
    /// - `InvalidUrl` if the permalink is not an http(s) URL
    /// - `Transport` / `EmptyBody` if the fetch fails
    /// - `Decode` / `MalformedMarkup` if the response is not HTML
    /// - `NoResults` if neither title nor author can be recovered
    pub async fn scrape_permalink(&self, permalink: &str) -> Result<CachedAuthorship> {
        if let Some(hit) = self.cache.get(permalink) {
            debug!(permalink, "permalink cache hit");
            return Ok(hit);
        }

        let url = parse_permalink(permalink)?;
        debug!(permalink, "permalink cache miss");

        let options = FetchOptions::new()
            .with_header(header::USER_AGENT, self.config.permalink_user_agent.as_str())
            .with_timeout(self.config.permalink_timeout());
        let bytes = self.client.fetch(url.as_str(), &options).await?;
        let authorship = extract_authorship(bytes, &self.config.fallback_delimiters)?;

        Ok(self.cache.insert(permalink, authorship))
    }
}

fn extract_search_results(bytes: Vec<u8>, query: &SearchQuery) -> Result<Vec<MixedResult>> {
    let document = parse_document(bytes)?;
    Ok(parse_search_results(&document, query))
}

fn extract_authorship(bytes: Vec<u8>, delimiters: &[String]) -> Result<CachedAuthorship> {
    let document = parse_document(bytes)?;
    parse_permalink_page(&document, delimiters)
}
