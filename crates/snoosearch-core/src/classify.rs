//! Post kind classification from a post's media URL

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::PostKind;

static COMMENTS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/r/[^/]+/comments/").expect("valid regex"));

const GALLERY_PATTERNS: &[(&str, &str)] = &[
    ("reddit.com", "/gallery/"),
    ("imgur.com", "/a/"),
    ("imgur.com", "/gallery/"),
];

const VIDEO_HOSTS: &[&str] = &[
    "v.redd.it",
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "streamable.com",
    "gfycat.com",
    "redgifs.com",
];

const IMAGE_HOSTS: &[&str] = &["i.redd.it", "i.imgur.com", "preview.redd.it"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "gifv"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Classifies a post by the shape of its media URL
///
/// Never fails: anything unrecognised is a plain link.
///
/// # Example
/// ```
/// use snoosearch_core::{classify_post_kind, PostKind};
/// assert_eq!(classify_post_kind("https://i.redd.it/abc.png"), PostKind::Image);
/// assert_eq!(classify_post_kind("https://v.redd.it/xyz"), PostKind::Video);
/// ```
pub fn classify_post_kind(media_url: &str) -> PostKind {
    let trimmed = media_url.trim();

    // Relative links on a result page point back into the site itself.
    if trimmed.starts_with('/') && !trimmed.starts_with("//") {
        return if COMMENTS_PATH.is_match(trimmed) {
            PostKind::Text
        } else {
            PostKind::Link
        };
    }

    let normalized = if trimmed.starts_with("//") {
        format!("https:{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let Ok(url) = Url::parse(&normalized) else {
        return PostKind::Link;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return PostKind::Link;
    }
    let Some(host) = url.host_str().map(|h| h.to_lowercase()) else {
        return PostKind::Link;
    };
    let path = url.path().to_lowercase();

    if host_matches(&host, "reddit.com") && COMMENTS_PATH.is_match(&path) {
        return PostKind::Text;
    }

    if GALLERY_PATTERNS
        .iter()
        .any(|(h, p)| host_matches(&host, h) && path.starts_with(p))
    {
        return PostKind::Gallery;
    }

    let extension = path_extension(&path);

    if VIDEO_HOSTS.iter().any(|h| host_matches(&host, h))
        || extension.is_some_and(|e| VIDEO_EXTENSIONS.contains(&e))
    {
        return PostKind::Video;
    }

    if IMAGE_HOSTS.iter().any(|h| host_matches(&host, h))
        || extension.is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
    {
        return PostKind::Image;
    }

    if path.trim_matches('/').is_empty() {
        PostKind::Link
    } else {
        PostKind::Article
    }
}

/// Exact host or any subdomain of it
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

fn path_extension(path: &str) -> Option<&str> {
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_text_posts() {
        assert_eq!(
            classify_post_kind("https://old.reddit.com/r/rust/comments/abc123/some_title/"),
            PostKind::Text
        );
        assert_eq!(
            classify_post_kind("/r/rust/comments/abc123/some_title/"),
            PostKind::Text
        );
    }

    #[test]
    fn test_classify_galleries() {
        assert_eq!(
            classify_post_kind("https://www.reddit.com/gallery/abc123"),
            PostKind::Gallery
        );
        assert_eq!(classify_post_kind("https://imgur.com/a/XyZ12"), PostKind::Gallery);
        assert_eq!(
            classify_post_kind("https://imgur.com/gallery/XyZ12"),
            PostKind::Gallery
        );
    }

    #[test]
    fn test_classify_videos() {
        assert_eq!(classify_post_kind("https://v.redd.it/abc123"), PostKind::Video);
        assert_eq!(
            classify_post_kind("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            PostKind::Video
        );
        assert_eq!(classify_post_kind("https://youtu.be/dQw4w9WgXcQ"), PostKind::Video);
        assert_eq!(classify_post_kind("https://i.imgur.com/abc.gifv"), PostKind::Video);
        assert_eq!(
            classify_post_kind("https://example.com/clips/demo.MP4"),
            PostKind::Video
        );
    }

    #[test]
    fn test_classify_images() {
        assert_eq!(classify_post_kind("https://i.redd.it/abc123.jpg"), PostKind::Image);
        assert_eq!(classify_post_kind("https://i.imgur.com/abc123"), PostKind::Image);
        assert_eq!(
            classify_post_kind("https://example.com/photos/cat.webp?width=640"),
            PostKind::Image
        );
        assert_eq!(classify_post_kind("//i.redd.it/abc.png"), PostKind::Image);
    }

    #[test]
    fn test_classify_articles() {
        assert_eq!(
            classify_post_kind("https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html"),
            PostKind::Article
        );
        assert_eq!(
            classify_post_kind("https://www.nytimes.com/2024/01/01/technology/ai.html"),
            PostKind::Article
        );
    }

    #[test]
    fn test_classify_falls_back_to_link() {
        assert_eq!(classify_post_kind("https://example.com/"), PostKind::Link);
        assert_eq!(classify_post_kind("https://example.com"), PostKind::Link);
        assert_eq!(classify_post_kind("mailto:someone@example.com"), PostKind::Link);
        assert_eq!(classify_post_kind("not a url at all"), PostKind::Link);
        assert_eq!(classify_post_kind(""), PostKind::Link);
        assert_eq!(classify_post_kind("/wiki/index"), PostKind::Link);
    }

    #[test]
    fn test_host_matches_subdomains_only() {
        assert!(host_matches("www.youtube.com", "youtube.com"));
        assert!(host_matches("youtube.com", "youtube.com"));
        assert!(!host_matches("notyoutube.com", "youtube.com"));
    }
}
