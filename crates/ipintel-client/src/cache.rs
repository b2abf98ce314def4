//! TTL-based response cache keyed by request signature.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// One cached value with its absolute expiry time.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Thread-safe TTL cache from request signature to decoded response.
///
/// Expired entries are evicted lazily: the first read that observes an
/// expired entry removes it and reports a miss, so a stale value is never
/// returned. There is no background sweep and no access-based TTL renewal.
#[derive(Debug, Default)]
pub struct ResponseCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> ResponseCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a value under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any existing entry for the key unconditionally.
    pub fn put(&self, key: &str, value: T, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), entry);
        }
    }

    /// Get the cached value for `key` if present and not expired.
    ///
    /// An expired entry is removed before reporting the miss.
    pub fn get(&self, key: &str) -> Option<T> {
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Expired: upgrade to a write lock and re-check, since a concurrent
        // put may have refreshed the key in between.
        let mut entries = self.entries.write().ok()?;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Remove the entry for `key`, if any.
    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of entries currently stored, including expired entries that no
    /// read has swept yet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
