//! Search results parser for reddit
//!
//! Extracts community and post records from an old-layout search page.
//! Extraction is best-effort per result: a block missing a required field is
//! dropped and logged, the rest of the page is still returned.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::{element_text, first_attr, first_text, selector};
use crate::classify::classify_post_kind;
use crate::types::{Community, MixedResult, Post, SearchQuery};

const COMMUNITY_RESULT: &str = ".search-result-subreddit";
const POST_RESULT: &str = ".search-result-link";
const SUBREDDIT_LINK: &str = "a.search-subreddit-link";
const TITLE_LINK: &str = "a.search-title";
const FLAIR: &str = ".linkflairlabel";
const AUTHOR_LINK: &str = "a.author";
const SCORE: &str = ".search-score";
const TIME: &str = "time[datetime]";
const COMMENTS_LINK: &str = "a.search-comments";
const FOOTER_MEDIA_LINK: &str = ".search-result-footer a.search-link";
const THUMBNAIL_IMAGE: &str = "a.thumbnail img";
const ID_ATTR: &str = "data-fullname";

static SUBREDDIT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?r/").expect("valid regex"));

/// Runs the extractors the query's filter asks for
///
/// Communities come first when both are requested.
pub fn parse_search_results(document: &Html, query: &SearchQuery) -> Vec<MixedResult> {
    let mut results = Vec::new();

    if query.wants_communities() {
        results.extend(parse_communities(document).into_iter().map(MixedResult::Community));
    }

    if query.wants_posts() {
        results.extend(parse_posts(document).into_iter().map(MixedResult::from_post));
    }

    results
}

/// Extracts community results, in page order
pub fn parse_communities(document: &Html) -> Vec<Community> {
    let Some(container) = selector(COMMUNITY_RESULT) else {
        return Vec::new();
    };

    document
        .select(&container)
        .filter_map(|element| match parse_community(&element) {
            Ok(community) => Some(community),
            Err(reason) => {
                debug!(reason, "dropping community result");
                None
            }
        })
        .collect()
}

fn parse_community(element: &ElementRef) -> Result<Community, &'static str> {
    let link = first_text(element, SUBREDDIT_LINK);
    let name = link.rsplit('/').next().map(str::trim).unwrap_or_default();

    if name.is_empty() {
        return Err("missing subreddit link");
    }

    Ok(Community {
        name: name.to_string(),
    })
}

/// Extracts post results, in page order
pub fn parse_posts(document: &Html) -> Vec<Post> {
    let Some(container) = selector(POST_RESULT) else {
        return Vec::new();
    };

    document
        .select(&container)
        .filter_map(|element| match parse_post(&element) {
            Ok(post) => Some(post),
            Err(reason) => {
                debug!(reason, "dropping post result");
                None
            }
        })
        .collect()
}

fn parse_post(element: &ElementRef) -> Result<Post, &'static str> {
    let id = element
        .value()
        .attr(ID_ATTR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or("missing id attribute")?
        .to_string();

    let title = first_text(element, TITLE_LINK);
    if title.is_empty() {
        return Err("missing title");
    }

    let subreddit = strip_subreddit_prefix(&first_text(element, SUBREDDIT_LINK)).to_string();
    if subreddit.is_empty() {
        return Err("missing subreddit");
    }

    let flair_tag = first_text(element, FLAIR);
    let author = first_text(element, AUTHOR_LINK);
    let vote_count_text = first_text(element, SCORE);
    let published_at_text = first_attr(element, TIME, "datetime").unwrap_or_default();

    let comments = selector(COMMENTS_LINK)
        .and_then(|sel| element.select(&sel).next())
        .ok_or("missing comments link")?;
    let comments_url = comments
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or("missing comments href")?
        .to_string();
    let comments_count_text = element_text(&comments)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    let media_url = first_attr(element, FOOTER_MEDIA_LINK, "href")
        .filter(|href| !href.is_empty())
        .unwrap_or_else(|| comments_url.clone());

    let kind = classify_post_kind(&media_url);

    let thumbnail_url = if kind.has_thumbnail() {
        first_attr(element, THUMBNAIL_IMAGE, "src")
            .filter(|src| !src.is_empty())
            .map(|src| absolutize_protocol_relative(&src))
    } else {
        None
    };

    Ok(Post {
        id,
        subreddit,
        title,
        flair_tag,
        author,
        vote_count_text,
        published_at_text,
        media_url,
        comments_url,
        comments_count_text,
        kind,
        thumbnail_url,
    })
}

/// Removes a leading `r/` or `/r/` from a subreddit name
///
/// # Example
/// ```
/// use snoosearch_core::parser::strip_subreddit_prefix;
/// assert_eq!(strip_subreddit_prefix("/r/rust"), "rust");
/// assert_eq!(strip_subreddit_prefix("R/rust"), "R/rust");
/// ```
pub fn strip_subreddit_prefix(name: &str) -> &str {
    match SUBREDDIT_PREFIX.find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

fn absolutize_protocol_relative(src: &str) -> String {
    match src.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => src.to_string(),
    }
}
