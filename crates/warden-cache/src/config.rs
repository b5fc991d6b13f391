//! Cache configuration.
//!
//! Two knobs bound the cache: a hard entry capacity and a per-entry
//! time-to-live. Configuration can be built in code or loaded from
//! environment variables with defaults suitable for a single service.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the cache capacity (entries).
pub const CAPACITY_ENV: &str = "WARDEN_CACHE_CAPACITY";

/// Environment variable holding the cache TTL in milliseconds.
pub const TTL_MS_ENV: &str = "WARDEN_CACHE_TTL_MS";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held. Zero disables the cache.
    pub capacity: usize,

    /// Time-to-live for an entry, measured from its last write.
    /// `Duration::ZERO` disables time-based expiry.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Create a configuration with explicit capacity and TTL.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { capacity, ttl }
    }

    /// Create a configuration whose entries never expire by time.
    pub fn without_ttl(capacity: usize) -> Self {
        Self {
            capacity,
            ttl: Duration::ZERO,
        }
    }

    /// Whether time-based expiry is enabled.
    pub fn expires(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WARDEN_CACHE_CAPACITY`: maximum entries (default: 10000)
    /// - `WARDEN_CACHE_TTL_MS`: entry TTL in milliseconds, 0 disables expiry (default: 300000)
    ///
    /// Unset or unparsable values fall back to the defaults. Use
    /// [`CacheConfig::try_from_env`] to reject bad values instead.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            capacity: std::env::var(CAPACITY_ENV)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default.capacity),
            ttl: std::env::var(TTL_MS_ENV)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.ttl),
        }
    }

    /// Load configuration from environment variables, failing on values
    /// that are present but cannot be parsed.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        let capacity = match std::env::var(CAPACITY_ENV) {
            Ok(raw) => parse_value(CAPACITY_ENV, &raw)?,
            Err(_) => default.capacity,
        };
        let ttl = match std::env::var(TTL_MS_ENV) {
            Ok(raw) => Duration::from_millis(parse_value(TTL_MS_ENV, &raw)?),
            Err(_) => default.ttl,
        };

        Ok(Self { capacity, ttl })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{:?}: {}", raw, e),
    })
}
