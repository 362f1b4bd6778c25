//! URL helper functions for reddit search
//!
//! Provides the search URL builder and permalink validation.

use url::Url;

use crate::error::{RedditError, Result};
use crate::types::SearchQuery;

/// Default search host. The old layout is server-rendered.
pub const BASE_URL: &str = "https://old.reddit.com";

/// Builds the search URL for a query against the given host
///
/// Always sends `q` and `type`. `sort` and `t` are only sent for sorted post
/// searches (empty filter); `include_over_18=on` only when adult content is
/// requested.
///
/// # Errors
/// `InvalidQuery` if the query text is blank or the result is not a valid URL
///
/// # Example
/// ```
/// use snoosearch_core::SearchQuery;
/// use snoosearch_core::url::build_search_url;
/// let url = build_search_url("https://old.reddit.com", &SearchQuery::communities("rust lang")).unwrap();
/// assert_eq!(url, "https://old.reddit.com/search?q=rust%20lang&type=sr");
/// ```
pub fn build_search_url(base_url: &str, query: &SearchQuery) -> Result<String> {
    if query.text.trim().is_empty() {
        return Err(RedditError::InvalidQuery(
            "Search query cannot be empty".to_string(),
        ));
    }

    let mut url = format!(
        "{}/search?q={}&type={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&query.text),
        urlencoding::encode(query.content_type_filter.trim())
    );

    if query.is_sorted_post_search() {
        url.push_str(&format!(
            "&sort={}&t={}",
            query.sort.as_str(),
            query.top_range.as_str()
        ));
    }

    if query.include_adult {
        url.push_str("&include_over_18=on");
    }

    Url::parse(&url).map_err(|e| RedditError::InvalidQuery(format!("{}: {}", url, e)))?;

    Ok(url)
}

/// Validates a permalink as an absolute http(s) URL with a host
///
/// # Errors
/// `InvalidUrl` for anything else
pub fn parse_permalink(permalink: &str) -> Result<Url> {
    let url = Url::parse(permalink.trim())
        .map_err(|e| RedditError::InvalidUrl(format!("{}: {}", permalink, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(RedditError::InvalidUrl(permalink.to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SortOption, TopRange};
    use proptest::prelude::*;

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn has_param(url: &str, key: &str) -> bool {
        query_pairs(url).iter().any(|(k, _)| k == key)
    }

    #[test]
    fn test_build_post_search_url() {
        let query = SearchQuery::new("rust", "", SortOption::Top, TopRange::Week, false);
        let url = build_search_url(BASE_URL, &query).unwrap();
        assert_eq!(
            url,
            "https://old.reddit.com/search?q=rust&type=&sort=top&t=week"
        );
    }

    #[test]
    fn test_build_community_search_url_has_no_sort() {
        let query = SearchQuery::new("rust", "sr", SortOption::New, TopRange::Day, false);
        let url = build_search_url(BASE_URL, &query).unwrap();
        assert_eq!(url, "https://old.reddit.com/search?q=rust&type=sr");
    }

    #[test]
    fn test_build_search_url_with_adult() {
        let query = SearchQuery::new("rust", "sr", SortOption::New, TopRange::Day, true);
        let url = build_search_url(BASE_URL, &query).unwrap();
        assert!(url.ends_with("&include_over_18=on"));
    }

    #[test]
    fn test_build_search_url_encodes_text() {
        let query = SearchQuery::posts("async & await?");
        let url = build_search_url(BASE_URL, &query).unwrap();
        let pairs = query_pairs(&url);
        assert_eq!(pairs[0], ("q".to_string(), "async & await?".to_string()));
    }

    #[test]
    fn test_build_search_url_keeps_surrounding_whitespace() {
        let query = SearchQuery::communities(" rust ");
        let url = build_search_url(BASE_URL, &query).unwrap();
        assert_eq!(url, "https://old.reddit.com/search?q=%20rust%20&type=sr");
        assert_eq!(query_pairs(&url)[0], ("q".to_string(), " rust ".to_string()));
    }

    #[test]
    fn test_build_search_url_trims_base_slash() {
        let url = build_search_url("http://127.0.0.1:8080/", &SearchQuery::communities("x")).unwrap();
        assert_eq!(url, "http://127.0.0.1:8080/search?q=x&type=sr");
    }

    #[test]
    fn test_build_search_url_empty_query() {
        let result = build_search_url(BASE_URL, &SearchQuery::posts("   "));
        match result {
            Err(RedditError::InvalidQuery(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidQuery error"),
        }
    }

    #[test]
    fn test_build_search_url_bad_base() {
        let result = build_search_url("not a host", &SearchQuery::posts("rust"));
        assert!(matches!(result, Err(RedditError::InvalidQuery(_))));
    }

    #[test]
    fn test_parse_permalink_valid() {
        let url = parse_permalink("https://www.reddit.com/r/rust/comments/abc/title/").unwrap();
        assert_eq!(url.host_str(), Some("www.reddit.com"));
    }

    #[test]
    fn test_parse_permalink_invalid() {
        assert!(matches!(
            parse_permalink("not a url"),
            Err(RedditError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_permalink("ftp://example.com/file"),
            Err(RedditError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_permalink("/r/rust/comments/abc"),
            Err(RedditError::InvalidUrl(_))
        ));
    }

    fn sort_strategy() -> impl Strategy<Value = SortOption> {
        prop_oneof![
            Just(SortOption::Relevance),
            Just(SortOption::Hot),
            Just(SortOption::Top),
            Just(SortOption::New),
            Just(SortOption::Comments),
        ]
    }

    fn range_strategy() -> impl Strategy<Value = TopRange> {
        prop_oneof![
            Just(TopRange::Hour),
            Just(TopRange::Day),
            Just(TopRange::Week),
            Just(TopRange::Month),
            Just(TopRange::Year),
            Just(TopRange::All),
        ]
    }

    proptest! {
        #[test]
        fn prop_post_search_has_sort_and_range(
            text in "[a-zA-Z0-9 ]*[a-zA-Z0-9][a-zA-Z0-9 ]*",
            sort in sort_strategy(),
            range in range_strategy(),
            adult in any::<bool>(),
        ) {
            let query = SearchQuery::new(text, "", sort, range, adult);
            let url = build_search_url(BASE_URL, &query).unwrap();
            let pairs = query_pairs(&url);
            prop_assert!(pairs.contains(&("type".to_string(), String::new())));
            prop_assert!(pairs.contains(&("sort".to_string(), sort.as_str().to_string())));
            prop_assert!(pairs.contains(&("t".to_string(), range.as_str().to_string())));
        }

        #[test]
        fn prop_filtered_search_has_no_sort(
            text in "[a-z]{1,12}",
            filter in prop_oneof![Just("sr"), Just("link"), Just("user"), Just("sr,link")],
            sort in sort_strategy(),
            range in range_strategy(),
        ) {
            let query = SearchQuery::new(text, filter, sort, range, false);
            let url = build_search_url(BASE_URL, &query).unwrap();
            prop_assert!(!has_param(&url, "sort"));
            prop_assert!(!has_param(&url, "t"));
        }

        #[test]
        fn prop_adult_flag_only_sent_when_on(
            text in "[a-z]{1,12}",
            filter in prop_oneof![Just(""), Just("sr"), Just("link")],
            adult in any::<bool>(),
        ) {
            let query = SearchQuery::new(text, filter, SortOption::Hot, TopRange::All, adult);
            let url = build_search_url(BASE_URL, &query).unwrap();
            let pairs = query_pairs(&url);
            let adult_values: Vec<&str> = pairs
                .iter()
                .filter(|(k, _)| k == "include_over_18")
                .map(|(_, v)| v.as_str())
                .collect();
            if adult {
                prop_assert_eq!(adult_values, vec!["on"]);
            } else {
                prop_assert!(adult_values.is_empty());
            }
        }
    }
}
