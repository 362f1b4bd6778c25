//! Core data types for the reddit search scraper
//!
//! Contains the search parameters and the records extracted from result pages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::RedditError;

/// Filter value selecting community (subreddit) results
pub const COMMUNITY_FILTER: &str = "sr";

/// Filter value selecting post (link) results without sorting
pub const POST_FILTER: &str = "link";

/// Result ordering for post searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::Hot => "hot",
            SortOption::Top => "top",
            SortOption::New => "new",
            SortOption::Comments => "comments",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = RedditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortOption::Relevance),
            "hot" => Ok(SortOption::Hot),
            "top" => Ok(SortOption::Top),
            "new" => Ok(SortOption::New),
            "comments" => Ok(SortOption::Comments),
            other => Err(RedditError::InvalidQuery(format!(
                "unknown sort option: {}",
                other
            ))),
        }
    }
}

/// Time window applied to post searches (the `t` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopRange {
    Hour,
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl TopRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopRange::Hour => "hour",
            TopRange::Day => "day",
            TopRange::Week => "week",
            TopRange::Month => "month",
            TopRange::Year => "year",
            TopRange::All => "all",
        }
    }
}

impl fmt::Display for TopRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopRange {
    type Err = RedditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(TopRange::Hour),
            "day" => Ok(TopRange::Day),
            "week" => Ok(TopRange::Week),
            "month" => Ok(TopRange::Month),
            "year" => Ok(TopRange::Year),
            "all" => Ok(TopRange::All),
            other => Err(RedditError::InvalidQuery(format!(
                "unknown top range: {}",
                other
            ))),
        }
    }
}

/// Parameters for a single search call
///
/// `content_type_filter` is sent verbatim as the `type` parameter. An empty
/// filter means a post search, which is the only kind that accepts sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub content_type_filter: String,
    pub sort: SortOption,
    pub top_range: TopRange,
    pub include_adult: bool,
}

impl SearchQuery {
    pub fn new(
        text: impl Into<String>,
        content_type_filter: impl Into<String>,
        sort: SortOption,
        top_range: TopRange,
        include_adult: bool,
    ) -> Self {
        Self {
            text: text.into(),
            content_type_filter: content_type_filter.into(),
            sort,
            top_range,
            include_adult,
        }
    }

    /// Sorted post search with default options
    pub fn posts(text: impl Into<String>) -> Self {
        Self::new(text, "", SortOption::default(), TopRange::default(), false)
    }

    /// Community search
    pub fn communities(text: impl Into<String>) -> Self {
        Self::new(
            text,
            COMMUNITY_FILTER,
            SortOption::default(),
            TopRange::default(),
            false,
        )
    }

    /// True when the filter is empty, i.e. a sortable post search
    pub fn is_sorted_post_search(&self) -> bool {
        self.content_type_filter.trim().is_empty()
    }

    pub fn wants_communities(&self) -> bool {
        self.filter_tokens().any(|t| t == COMMUNITY_FILTER)
    }

    pub fn wants_posts(&self) -> bool {
        self.is_sorted_post_search() || self.filter_tokens().any(|t| t == POST_FILTER)
    }

    fn filter_tokens(&self) -> impl Iterator<Item = &str> {
        self.content_type_filter
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A community (subreddit) search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Subreddit name without any `r/` prefix
    pub name: String,
}

/// Classified content category of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Image,
    Video,
    Gallery,
    Article,
    Link,
    Text,
}

impl PostKind {
    /// Kinds whose search results carry a meaningful preview image
    pub fn has_thumbnail(&self) -> bool {
        matches!(self, PostKind::Video | PostKind::Gallery | PostKind::Article)
    }
}

/// A post search result
///
/// Counts and timestamps are kept as the display text found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque element identifier (e.g. "t3_abc123")
    pub id: String,

    /// Subreddit name without any `r/` prefix
    pub subreddit: String,

    pub title: String,

    /// Flair label, empty when the post has none
    pub flair_tag: String,

    /// Author name, empty when missing (e.g. deleted accounts)
    pub author: String,

    /// Score as displayed (e.g. "1,234 points")
    pub vote_count_text: String,

    /// Value of the `datetime` attribute (e.g. "2024-03-01T12:00:00+00:00")
    pub published_at_text: String,

    /// Linked media, or `comments_url` for text posts. Never empty.
    pub media_url: String,

    pub comments_url: String,

    /// Leading number of the comments link (e.g. "42")
    pub comments_count_text: String,

    pub kind: PostKind,

    /// Preview image, only for video, gallery and article posts
    pub thumbnail_url: Option<String>,
}

/// One entry of a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MixedResult {
    Community(Community),
    Post {
        post: Post,
        published_at: Option<DateTime<FixedOffset>>,
    },
}

impl MixedResult {
    /// Wraps a post, parsing its timestamp text when it is RFC 3339
    pub fn from_post(post: Post) -> Self {
        let published_at = DateTime::parse_from_rfc3339(post.published_at_text.trim()).ok();
        MixedResult::Post { post, published_at }
    }

    pub fn as_community(&self) -> Option<&Community> {
        match self {
            MixedResult::Community(c) => Some(c),
            MixedResult::Post { .. } => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            MixedResult::Post { post, .. } => Some(post),
            MixedResult::Community(_) => None,
        }
    }
}

/// Title and author recovered from a permalink page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAuthorship {
    pub title: String,
    pub author: String,
}
