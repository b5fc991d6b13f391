//! Background expiry for [`ExpiringLruCache`].
//!
//! Lazy expiry only removes entries that are read again. The sweeper runs
//! [`ExpiringLruCache::expire_items`] on a fixed period so entries nobody asks
//! for stop occupying capacity.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::ExpiringLruCache;

/// Shortest period accepted by [`spawn_sweeper`].
pub const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running sweeper task.
///
/// Dropping the handle aborts the task. Call [`SweeperHandle::shutdown`] to
/// stop it and wait for the current sweep to finish.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Cache sweeper task ended abnormally");
            }
        }
    }

    /// Whether the sweeper task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn a task on the current tokio runtime that sweeps `cache` every
/// `period`. Periods shorter than [`MIN_SWEEP_PERIOD`] are raised to it.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use warden_cache::{spawn_sweeper, ExpiringLruCache};
///
/// async fn run() {
///     let cache = Arc::new(ExpiringLruCache::<String, bool>::new(1024, Duration::from_secs(30)));
///     let sweeper = spawn_sweeper(Arc::clone(&cache), Duration::from_secs(10));
///
///     // ... serve requests ...
///
///     sweeper.shutdown().await;
/// }
/// ```
pub fn spawn_sweeper<K, V>(cache: Arc<ExpiringLruCache<K, V>>, period: Duration) -> SweeperHandle
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    let period = period.max(MIN_SWEEP_PERIOD);
    let (tx, mut rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        tracing::debug!(period_ms = period.as_millis() as u64, "Cache sweeper started");

        loop {
            tokio::select! {
                _ = &mut rx => break,
                _ = ticker.tick() => {
                    let removed = cache.expire_items();
                    if removed > 0 {
                        tracing::debug!(removed, remaining = cache.len(), "Swept expired cache entries");
                    } else {
                        tracing::trace!("Cache sweep found nothing to expire");
                    }
                }
            }
        }

        tracing::debug!("Cache sweeper stopped");
    });

    SweeperHandle {
        shutdown: Some(tx),
        task: Some(task),
    }
}
