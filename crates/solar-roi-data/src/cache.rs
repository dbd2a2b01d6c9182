//! Injectable TTL cache for rate-limited provider responses.
//!
//! The store is a seam: tests and single-process deployments use
//! [`MemoryCache`]; a multi-instance deployment can plug in a shared store
//! without touching the clients.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A TTL'd key-value store. Values are cloned out on read.
pub trait CacheStore<V: Clone>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;
    fn put(&self, key: String, value: V, ttl: Duration);
}

/// Per-process in-memory cache. Entries expire lazily on read; there is no
/// background sweeper and the cache is lost on restart.
pub struct MemoryCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

struct CacheEntry<V> {
    stored_at: Instant,
    ttl: Duration,
    value: V,
}

impl<V> MemoryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send> CacheStore<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= entry.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: String, value: V, ttl: Duration) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                ttl,
                value,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = MemoryCache::new();
        cache.put("a".into(), 42u32, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(42));
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn expiry_is_lazy_on_read() {
        let cache = MemoryCache::new();
        cache.put("a".into(), 1u32, Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("a"), None);
        // A second read stays a miss; the entry was removed
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn put_overwrites_and_refreshes() {
        let cache = MemoryCache::new();
        cache.put("a".into(), 1u32, Duration::from_secs(60));
        cache.put("a".into(), 2u32, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(2));
    }
}
