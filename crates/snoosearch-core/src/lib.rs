//! Reddit Search Scraper Core Library
//!
//! Provides async API for searching reddit and recovering post authorship
//! from permalinks, by scraping server-rendered HTML.
//!
//! # Overview
//!
//! This crate provides:
//! - A search URL builder for post and community searches
//! - An HTTP client that bypasses response caches and never retries
//! - Best-effort extractors turning search pages into typed records
//! - A permalink scraper backed by an in-memory lookup cache
//!
//! # Example
//!
//! ```no_run
//! use snoosearch_core::{MixedResult, RedditScraper, Result, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = RedditScraper::new()?;
//!
//!     // Search for communities
//!     let results = scraper.search(&SearchQuery::communities("rust")).await?;
//!     for result in &results {
//!         if let MixedResult::Community(community) = result {
//!             println!("r/{}", community.name);
//!         }
//!     }
//!
//!     // Recover title and author of a post
//!     let post = scraper
//!         .scrape_permalink("https://old.reddit.com/r/rust/comments/abc123/title/")
//!         .await?;
//!     println!("{} by {}", post.title, post.author);
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod classify;
mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export cache types
pub use cache::AuthorshipCache;

// Re-export classifier
pub use classify::classify_post_kind;

// Re-export client types
pub use client::{ClientConfig, DEFAULT_FALLBACK_DELIMITERS, FetchOptions, RedditClient};

// Re-export error types
pub use error::{RedditError, Result};

// Re-export parser functions
pub use parser::{parse_communities, parse_document, parse_permalink_page, parse_posts};

// Re-export main scraper API
pub use scraper::RedditScraper;

// Re-export data types
pub use types::{
    COMMUNITY_FILTER, CachedAuthorship, Community, MixedResult, POST_FILTER, Post, PostKind,
    SearchQuery, SortOption, TopRange,
};

// Re-export URL helper functions for convenience
pub use url::{build_search_url, parse_permalink};
