//! In-memory lookup cache for permalink authorship
//!
//! Maps a permalink URL to the title and author recovered from it. Entries
//! are written once and never refreshed. Only a cache built with an explicit
//! capacity evicts, oldest entry first.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::types::CachedAuthorship;

static GLOBAL_CACHE: LazyLock<Arc<AuthorshipCache>> =
    LazyLock::new(|| Arc::new(AuthorshipCache::new()));

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CachedAuthorship>,
    order: VecDeque<String>,
}

/// Thread-safe permalink -> (title, author) map
///
/// Reads and writes go through a single `RwLock`. Concurrent misses for the
/// same URL are not deduplicated; the first write wins.
#[derive(Debug, Default)]
pub struct AuthorshipCache {
    inner: RwLock<CacheInner>,
    capacity: Option<usize>,
}

impl AuthorshipCache {
    /// Unbounded cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            capacity: Some(capacity.max(1)),
        }
    }

    /// The shared process-wide instance, unbounded
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_CACHE)
    }

    pub fn get(&self, url: &str) -> Option<CachedAuthorship> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.get(url).cloned()
    }

    /// Stores an entry unless one already exists for `url`
    ///
    /// Returns the entry that is cached after the call.
    pub fn insert(&self, url: &str, value: CachedAuthorship) -> CachedAuthorship {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = inner.entries.get(url) {
            return existing.clone();
        }

        if let Some(capacity) = self.capacity {
            while inner.entries.len() >= capacity {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
            }
            inner.order.push_back(url.to_string());
        }

        inner.entries.insert(url.to_string(), value.clone());
        value
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn authorship(title: &str, author: &str) -> CachedAuthorship {
        CachedAuthorship {
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    #[test]
    fn test_get_missing() {
        let cache = AuthorshipCache::new();
        assert!(cache.get("https://reddit.com/r/a/comments/1").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_then_get() {
        let cache = AuthorshipCache::new();
        cache.insert("u1", authorship("Title", "alice"));
        assert_eq!(cache.get("u1"), Some(authorship("Title", "alice")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_write_wins() {
        let cache = AuthorshipCache::new();
        cache.insert("u1", authorship("First", "alice"));
        let stored = cache.insert("u1", authorship("Second", "bob"));
        assert_eq!(stored, authorship("First", "alice"));
        assert_eq!(cache.get("u1"), Some(authorship("First", "alice")));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = AuthorshipCache::with_capacity(2);
        cache.insert("u1", authorship("One", "a"));
        cache.insert("u2", authorship("Two", "b"));
        cache.insert("u3", authorship("Three", "c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("u1").is_none());
        assert!(cache.get("u2").is_some());
        assert!(cache.get("u3").is_some());
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let cache = AuthorshipCache::with_capacity(0);
        assert_eq!(cache.capacity(), Some(1));
        cache.insert("u1", authorship("One", "a"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_global_is_shared() {
        let a = AuthorshipCache::global();
        let b = AuthorshipCache::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.capacity(), None);
    }

    #[test]
    fn test_unbounded_keeps_no_eviction_order() {
        let cache = AuthorshipCache::new();
        cache.insert("u1", authorship("One", "a"));
        cache.insert("u2", authorship("Two", "b"));

        let inner = cache.inner.read().unwrap();
        assert_eq!(inner.entries.len(), 2);
        assert!(inner.order.is_empty());
    }

    #[test]
    fn test_global_cache_never_evicts() {
        let cache = AuthorshipCache::global();
        let kept = "https://cache.test/global/kept";
        cache.insert(kept, authorship("Kept", "alice"));

        for i in 0..2048 {
            cache.insert(
                &format!("https://cache.test/global/filler/{}", i),
                authorship("Filler", "bob"),
            );
        }

        assert_eq!(cache.get(kept), Some(authorship("Kept", "alice")));
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(AuthorshipCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for j in 0..50 {
                        let url = format!("u{}", j);
                        cache.insert(&url, authorship(&format!("t{}", i), "a"));
                        assert!(cache.get(&url).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 50);
    }
}
