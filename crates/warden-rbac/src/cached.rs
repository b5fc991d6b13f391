//! # Cached Decisions
//!
//! Wraps any [`Authorizer`] with an [`ExpiringLruCache`] so repeated
//! questions skip evaluation.
//!
//! The cache key is `"{entity}:{statement}"`. Cached answers are trusted
//! verbatim until they are evicted or expire, so role changes become
//! visible within one TTL rather than immediately.

use std::sync::Arc;

use warden_cache::{CacheConfig, CacheStats, ExpiringLruCache};

use crate::engine::Authorizer;
use crate::error::RbacResult;
use crate::policy::EntityId;
use crate::statement::Statement;

/// Decision cache keyed by entity and statement identity.
pub type DecisionCache = ExpiringLruCache<String, bool>;

/// An [`Authorizer`] that memoizes another one.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use warden_rbac::{
///     Authorizer, CachingAuthorizer, DecisionEngine, Effect, Env, Method, Statement,
///     StaticRoleSource,
/// };
/// use warden_cache::CacheConfig;
///
/// let engine = DecisionEngine::new(StaticRoleSource::default());
/// let authorizer = CachingAuthorizer::new(engine, CacheConfig::new(1024, Duration::from_secs(30)));
///
/// let request = Statement::endpoint(Env::Prod, Method::Get, "/example", Effect::Allow);
/// assert!(!authorizer.is_authorized(&"entity1".into(), &request));
/// assert_eq!(authorizer.cache().len(), 1);
/// ```
#[derive(Debug)]
pub struct CachingAuthorizer<A> {
    inner: A,
    cache: Arc<DecisionCache>,
}

impl<A: Authorizer> CachingAuthorizer<A> {
    /// Wrap `inner` with a new cache built from `config`.
    pub fn new(inner: A, config: CacheConfig) -> Self {
        Self::with_cache(inner, Arc::new(ExpiringLruCache::with_config(config)))
    }

    /// Wrap `inner` with a cache configured from the environment
    /// (see [`CacheConfig::try_from_env`]).
    pub fn from_env(inner: A) -> RbacResult<Self> {
        Ok(Self::new(inner, CacheConfig::try_from_env()?))
    }

    /// Wrap `inner` with an existing cache.
    pub fn with_cache(inner: A, cache: Arc<DecisionCache>) -> Self {
        Self { inner, cache }
    }

    /// The wrapped authorizer.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// The decision cache, e.g. to hand to a background sweeper.
    pub fn cache(&self) -> &Arc<DecisionCache> {
        &self.cache
    }

    /// Cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached decision, forcing fresh evaluation.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    fn cache_key(entity: &EntityId, request: &Statement) -> String {
        format!("{}:{}", entity, request)
    }
}

impl<A: Authorizer> Authorizer for CachingAuthorizer<A> {
    fn is_authorized(&self, entity: &EntityId, request: &Statement) -> bool {
        let key = Self::cache_key(entity, request);
        if let Some(allowed) = self.cache.get(&key) {
            tracing::trace!(key = %key, allowed, "Decision cache hit");
            return allowed;
        }

        let allowed = self.inner.is_authorized(entity, request);
        tracing::trace!(key = %key, allowed, "Decision cache miss");
        self.cache.put(key, allowed);
        allowed
    }
}
