//! # Warden Cache
//!
//! Bounded, time-expiring memoization for authorization decisions.
//!
//! ## Overview
//!
//! The warden-cache crate handles:
//! - **Capacity**: a hard ceiling on entries with least-recently-used eviction
//! - **TTL**: per-entry time-to-live measured from the last write
//! - **Sweeping**: batch removal of expired entries, optionally on a timer
//! - **Statistics**: hits, misses, evictions and expirations
//!
//! ## Semantics
//!
//! ```text
//! get(key)   fresh   -> value, entry becomes most recently used (TTL unchanged)
//!            expired -> entry removed, miss
//! put(k, v)  existing -> value replaced, TTL restarted, most recently used
//!            new      -> LRU entry evicted when full, then inserted
//! ```
//!
//! All operations take a single lock for their whole duration.
//!
//! ## Features
//!
//! - `sweeper` (default): background expiry task on a tokio runtime
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use warden_cache::{CacheConfig, ExpiringLruCache};
//!
//! let cache = ExpiringLruCache::with_config(CacheConfig::new(1024, Duration::from_secs(60)));
//!
//! cache.put("entity1:PROD:GET:/example:ALLOW:READ".to_string(), true);
//! assert_eq!(cache.get("entity1:PROD:GET:/example:ALLOW:READ"), Some(true));
//!
//! // Drop everything that has outlived its TTL
//! let removed = cache.expire_items();
//! ```

pub mod config;
pub mod store;
#[cfg(feature = "sweeper")]
pub mod sweeper;

// Re-export main types
pub use config::{CacheConfig, ConfigError};
pub use store::{CacheStats, ExpiringLruCache};

#[cfg(feature = "sweeper")]
pub use sweeper::{spawn_sweeper, SweeperHandle};
