//! Permalink page parser
//!
//! Recovers a post's title and author from its permalink page. When the
//! title or author links are missing (comment pages, new layouts) the page
//! title is split on a locale-specific "<author> commented on <title>"
//! separator instead.

use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::error::{RedditError, Result};
use crate::types::CachedAuthorship;

const TITLE_LINK: &str = "a.title";
const AUTHOR_LINK: &str = "a.author";
const PAGE_TITLE: &str = "title";
const OG_TITLE: &str = r#"meta[property="og:title"]"#;

/// Extracts title and author from a permalink page
///
/// # Arguments
/// * `document` - Parsed permalink page
/// * `delimiters` - Page title separators between author and title, tried in order
///
/// # Errors
/// Returns `NoResults` if neither the links nor the page title yield both fields
pub fn parse_permalink_page(document: &Html, delimiters: &[String]) -> Result<CachedAuthorship> {
    let root = document.root_element();
    let title = first_text(&root, TITLE_LINK);
    let author = first_text(&root, AUTHOR_LINK);

    if !title.is_empty() && !author.is_empty() {
        return Ok(CachedAuthorship { title, author });
    }

    page_titles(&root)
        .iter()
        .find_map(|text| split_page_title(text, delimiters))
        .ok_or_else(|| {
            RedditError::NoResults("no title or author found on permalink page".to_string())
        })
}

fn first_text(root: &ElementRef, css: &str) -> String {
    selector(css)
        .and_then(|sel| root.select(&sel).map(|el| element_text(&el)).find(|t| !t.is_empty()))
        .unwrap_or_default()
}

/// `<title>` text followed by the `og:title` meta content, if present
fn page_titles(root: &ElementRef) -> Vec<String> {
    let mut titles = Vec::new();

    let title = first_text(root, PAGE_TITLE);
    if !title.is_empty() {
        titles.push(title);
    }

    if let Some(content) = selector(OG_TITLE)
        .and_then(|sel| root.select(&sel).next())
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        titles.push(content.to_string());
    }

    titles
}

/// Splits "<author><delimiter><title>" on the first matching delimiter
fn split_page_title(text: &str, delimiters: &[String]) -> Option<CachedAuthorship> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    delimiters
        .iter()
        .filter(|d| !d.trim().is_empty())
        .find_map(|delimiter| {
            let (author, title) = text.split_once(delimiter.as_str())?;
            let author = author.trim();
            let title = title.trim();
            if author.is_empty() || title.is_empty() {
                return None;
            }
            Some(CachedAuthorship {
                title: title.to_string(),
                author: author.to_string(),
            })
        })
}
