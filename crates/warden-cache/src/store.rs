//! # Expiring LRU Store
//!
//! A bounded key/value store with two independent limits:
//! - **Capacity**: inserting a new key into a full store evicts the
//!   least-recently-used entry first.
//! - **TTL**: an entry older than the TTL (measured from its last write)
//!   is treated as absent and removed when touched or swept.
//!
//! Reads reorder recency but never extend an entry's lifetime; only writes
//! refresh the timestamp. Every operation holds one mutex for its whole
//! duration, so expiry checks, eviction and reordering are atomic.

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;

/// Stored value plus the instant it was last written.
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    written_at: Instant,
}

impl<V> Entry<V> {
    fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            written_at: now,
        }
    }

    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        !ttl.is_zero() && now.saturating_duration_since(self.written_at) > ttl
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups that returned a fresh value.
    pub hits: u64,
    /// Lookups that found nothing (absent or expired).
    pub misses: u64,
    /// New keys written.
    pub inserts: u64,
    /// Existing keys overwritten.
    pub updates: u64,
    /// Entries dropped to respect capacity.
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed.
    pub expirations: u64,
    /// Entries currently held.
    pub entries: usize,
    /// Configured capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, Entry<V>>,
    stats: CacheStats,
}

/// Thread-safe LRU cache with per-entry time-to-live.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use warden_cache::ExpiringLruCache;
///
/// let cache = ExpiringLruCache::new(2, Duration::from_secs(60));
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3); // evicts "a"
///
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("c"), Some(3));
/// ```
pub struct ExpiringLruCache<K: Hash + Eq, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

impl<K: Hash + Eq, V> std::fmt::Debug for ExpiringLruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringLruCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("len", &self.inner.lock().entries.len())
            .finish()
    }
}

impl<K, V> ExpiringLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each living for
    /// `ttl` after its last write. A zero capacity disables storage; a zero
    /// TTL disables time-based expiry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        // A zero-capacity cache never stores, so the backing list size is moot.
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(bound),
                stats: CacheStats {
                    capacity,
                    ..CacheStats::default()
                },
            }),
            capacity,
            ttl,
        }
    }

    /// Create a cache from a [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Self {
        Self::new(config.capacity, config.ttl)
    }

    /// Look up a key.
    ///
    /// A fresh entry becomes the most recently used and its value is
    /// returned. An expired entry is removed and reported as absent. The
    /// entry's timestamp is left untouched either way.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.peek(key) {
            Some(entry) => entry.is_expired(self.ttl, now),
            None => {
                inner.stats.misses += 1;
                return None;
            }
        };

        if expired {
            inner.entries.pop(key);
            inner.stats.expirations += 1;
            inner.stats.misses += 1;
            tracing::trace!("cache entry expired on read");
            return None;
        }

        inner.stats.hits += 1;
        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert or overwrite a key.
    ///
    /// Overwriting refreshes the value and timestamp and marks the key most
    /// recently used. Inserting into a full cache evicts the least recently
    /// used entry first.
    pub fn put(&self, key: K, value: V) {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if self.capacity == 0 {
            inner.stats.evictions += 1;
            return;
        }

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.value = value;
            entry.written_at = now;
            inner.stats.updates += 1;
            return;
        }

        // The key is new, so anything handed back is the evicted LRU entry.
        if inner.entries.push(key, Entry::new(value, now)).is_some() {
            inner.stats.evictions += 1;
            tracing::trace!(capacity = self.capacity, "evicted least recently used cache entry");
        }
        inner.stats.inserts += 1;
    }

    /// Remove every expired entry and return how many were dropped.
    ///
    /// The whole list is examined. Reads reorder entries without touching
    /// their timestamps, so recency order does not track age and stopping
    /// at the first fresh entry from the LRU end could leave stale entries
    /// behind.
    pub fn expire_items(&self) -> usize {
        if self.ttl.is_zero() {
            return 0;
        }

        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired: Vec<K> = inner
            .entries
            .iter()
            .rev()
            .filter(|(_, entry)| entry.is_expired(self.ttl, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.entries.pop(key);
        }
        inner.stats.expirations += expired.len() as u64;

        expired.len()
    }

    /// Remove a key, returning its value if it was present and fresh.
    ///
    /// An expired entry is still removed and counted as an expiration.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        let entry = inner.entries.pop(key)?;

        if entry.is_expired(self.ttl, now) {
            inner.stats.expirations += 1;
            return None;
        }
        Some(entry.value)
    }

    /// Drop every entry. Statistics counters are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Number of entries held, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len(),
            ..inner.stats
        }
    }
}
