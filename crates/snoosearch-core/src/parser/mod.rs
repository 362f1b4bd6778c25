//! HTML parsers for reddit pages
//!
//! Contains the document decoder and one module per page type.

pub mod permalink;
pub mod search;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::{RedditError, Result};

pub use permalink::parse_permalink_page;
pub use search::{parse_communities, parse_posts, strip_subreddit_prefix};

/// Decodes response bytes as UTF-8 and parses them into a document
///
/// Broken markup still parses into a partial tree. Only a body with no markup
/// at all is rejected.
///
/// # Errors
/// - `Decode` if the bytes are not valid UTF-8
/// - `MalformedMarkup` if the text contains no tags
pub fn parse_document(bytes: Vec<u8>) -> Result<Html> {
    let text = String::from_utf8(bytes)?;

    if !text.contains('<') {
        return Err(RedditError::MalformedMarkup(
            "response contains no markup".to_string(),
        ));
    }

    Ok(Html::parse_document(&text))
}

/// Compiles a CSS selector, logging instead of failing
pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(css, error = ?e, "invalid selector");
            None
        }
    }
}

/// Trimmed text content of an element
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first descendant matching `css`, empty if none
pub(crate) fn first_text(element: &ElementRef, css: &str) -> String {
    selector(css)
        .and_then(|sel| element.select(&sel).next().map(|el| element_text(&el)))
        .unwrap_or_default()
}

/// Attribute of the first descendant matching `css`
pub(crate) fn first_attr(element: &ElementRef, css: &str, attr: &str) -> Option<String> {
    let sel = selector(css)?;
    element
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
}
