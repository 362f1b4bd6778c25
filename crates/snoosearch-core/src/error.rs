//! Error types for the reddit search scraper
//!
//! Every failure of the search and permalink paths maps to exactly one
//! variant so callers can tell a bad input from a network failure from
//! a page that simply had nothing to extract.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so errors can be handed to a frontend as plain strings.
#[derive(Error, Debug)]
pub enum RedditError {
    /// Search parameters could not be assembled into a well-formed URL
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Permalink is not a well-formed http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network, DNS, TLS or HTTP status failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request succeeded but the response carried no bytes
    #[error("Empty response body from {0}")]
    EmptyBody(String),

    /// Response bytes were not valid UTF-8
    #[error("Failed to decode response: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Response could not be parsed into a document at all
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// Page parsed but nothing usable could be extracted from it
    #[error("No results: {0}")]
    NoResults(String),
}

impl RedditError {
    /// Whether a caller may reasonably try the same call again
    ///
    /// The library itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            RedditError::Transport(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl Serialize for RedditError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, RedditError>;
