//! Expiring LRU memo of retrieval results, keyed by normalised query text.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

struct CachedResult {
    stored_at: Instant,
    indices: Vec<usize>,
}

/// Remembers which store items a query retrieved. Entries older than the
/// expiry are treated as misses and dropped on lookup.
pub struct RetrievalCache {
    enabled: bool,
    expiry: Duration,
    entries: Mutex<LruCache<String, CachedResult>>,
}

/// Lowercase and collapse whitespace so trivially different spellings share an entry.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl RetrievalCache {
    pub fn new(enabled: bool, capacity: usize, expiry: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            enabled,
            expiry,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get(&self, query: &str) -> Option<Vec<usize>> {
        self.get_at(query, Instant::now())
    }

    pub fn insert(&self, query: &str, indices: Vec<usize>) {
        self.insert_at(query, indices, Instant::now())
    }

    pub fn get_at(&self, query: &str, now: Instant) -> Option<Vec<usize>> {
        if !self.enabled {
            return None;
        }
        let key = normalize_query(query);
        let mut entries = self.entries.lock();
        let expired = match entries.get(&key) {
            Some(entry) if now.saturating_duration_since(entry.stored_at) <= self.expiry => {
                return Some(entry.indices.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(&key);
        }
        None
    }

    pub fn insert_at(&self, query: &str, indices: Vec<usize>, now: Instant) {
        if !self.enabled {
            return;
        }
        self.entries.lock().put(
            normalize_query(query),
            CachedResult {
                stored_at: now,
                indices,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  JACK   F5\tcost "), "jack f5 cost");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn test_hit_ignores_case_and_spacing() {
        let cache = RetrievalCache::new(true, 8, Duration::from_secs(300));
        cache.insert("jack f5 cost", vec![0, 4, 2]);
        assert_eq!(cache.get("  JACK F5   cost"), Some(vec![0, 4, 2]));
        assert_eq!(cache.get("jack a4f"), None);
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = RetrievalCache::new(true, 8, Duration::from_secs(60));
        let stored = Instant::now();
        cache.insert_at("warranty", vec![1], stored);
        assert!(cache.get_at("warranty", stored + Duration::from_secs(30)).is_some());
        assert!(cache.get_at("warranty", stored + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = RetrievalCache::new(false, 8, Duration::from_secs(300));
        cache.insert("warranty", vec![1]);
        assert!(cache.is_empty());
        assert!(cache.get("warranty").is_none());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = RetrievalCache::new(true, 2, Duration::from_secs(300));
        cache.insert("a", vec![0]);
        cache.insert("b", vec![1]);
        cache.get("a");
        cache.insert("c", vec![2]);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert_eq!(cache.len(), 2);

        let zero = RetrievalCache::new(true, 0, Duration::from_secs(300));
        zero.insert("a", vec![0]);
        assert_eq!(zero.len(), 1);
    }
}
