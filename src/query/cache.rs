//! Process-wide query cache.
//!
//! Entries map a [`QueryKey`] to a value, the time it was stored and its
//! staleness window. Reads within the window are served from memory. Reads of
//! a stale entry return the cached value immediately and start one background
//! refetch for that key. Reads of a missing entry wait for the network; a
//! second reader of the same key joins the fetch already in flight.
//!
//! Invalidation drops matching entries and forgets their in-flight fetches. A
//! forgotten fetch still resolves for the callers awaiting it but does not
//! write its result back. Fetches for keys outside the prefix are unaffected.

use super::key::QueryKey;
use super::metrics::CacheMetrics;
use crate::context::ContextValue;
use crate::error::ApiError;
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

type CachedValue = Arc<dyn Any + Send + Sync>;
type FetchFuture = BoxFuture<'static, Result<CachedValue, ApiError>>;

#[derive(Clone)]
struct CacheEntry {
    value: CachedValue,
    updated_at: Instant,
    stale_time: Duration,
}

impl CacheEntry {
    fn is_stale(&self, now: Instant) -> bool {
        now.duration_since(self.updated_at) >= self.stale_time
    }
}

/// A fetch some caller is waiting on. Only a weak handle is kept so the fetch
/// is dropped once nobody awaits it.
struct InFlight {
    id: u64,
    fetch: WeakShared<FetchFuture>,
}

struct CacheInner {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    in_flight: Mutex<HashMap<QueryKey, InFlight>>,
    next_fetch_id: AtomicU64,
    idle: Notify,
    retry: RetryConfig,
    metrics: CacheMetrics,
}

/// Removes its fetch from the in-flight table when the fetch completes, is
/// dropped, or panics.
struct InFlightGuard {
    inner: Arc<CacheInner>,
    key: QueryKey,
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.inner.lock_in_flight();
        if in_flight.get(&self.key).is_some_and(|f| f.id == self.id) {
            in_flight.remove(&self.key);
        }
        if in_flight.is_empty() {
            self.inner.idle.notify_waiters();
        }
    }
}

/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl ContextValue for QueryCache {
    const CONSUMER: &'static str = "use_query_client";
    const PROVIDER: &'static str = "QueryClientProvider";
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(RetryConfig::query())
    }
}

impl QueryCache {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                next_fetch_id: AtomicU64::new(0),
                idle: Notify::new(),
                retry,
                metrics: CacheMetrics::default(),
            }),
        }
    }

    /// Read `key`, fetching when there is nothing usable cached.
    ///
    /// Errors are returned to the caller after the retry policy is exhausted
    /// and are never cached. Concurrent callers of the same key share one
    /// fetch and its outcome.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        stale_time: Duration,
        fetcher: F,
    ) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let now = Instant::now();
        let cached = self.inner.lock_entries().get(&key).cloned();

        if let Some(entry) = cached {
            if let Some(value) = entry.value.downcast_ref::<T>() {
                self.inner.metrics.record_hit();
                if entry.is_stale(now) {
                    debug!("Cache stale for {}, revalidating in background", key);
                    self.spawn_refetch(key, stale_time, fetcher);
                } else {
                    debug!("Cache hit for {}", key);
                }
                return Ok(value.clone());
            }
            warn!("Cached value for {} has an unexpected type, refetching", key);
        }

        self.inner.metrics.record_miss();
        let (fetch, started) = self.join_or_start(&key, stale_time, fetcher);
        if started {
            debug!("Cache miss for {}", key);
        } else {
            debug!("Cache miss for {}, joining the fetch in flight", key);
        }

        let value = fetch.await?;
        value.downcast_ref::<T>().cloned().ok_or_else(|| ApiError::Decode {
            endpoint: key.to_string(),
            message: format!("in-flight value is not a {}", std::any::type_name::<T>()),
        })
    }

    /// Cached value for `key`, fresh or stale, without fetching.
    pub fn get_query_data<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner
            .lock_entries()
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    /// Drop every entry under `prefix`. Returns how many were dropped.
    ///
    /// Fetches in flight under `prefix` are forgotten: their results reach
    /// the callers already waiting but are not stored, and the next read
    /// starts a new fetch.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let (removed, forgotten) = {
            let mut entries = self.inner.lock_entries();
            let mut in_flight = self.inner.lock_in_flight();

            let before = entries.len();
            entries.retain(|key, _| !key.starts_with(prefix));
            let in_flight_before = in_flight.len();
            in_flight.retain(|key, _| !key.starts_with(prefix));
            if in_flight.is_empty() {
                self.inner.idle.notify_waiters();
            }
            (before - entries.len(), in_flight_before - in_flight.len())
        };

        self.inner.metrics.record_invalidated(removed);
        info!(
            "Invalidated {} cache entries under {} ({} fetches in flight forgotten)",
            removed, prefix, forgotten
        );
        removed
    }

    /// Whether a fetch for `key` is in flight, first load or background.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner.lock_in_flight().contains_key(key)
    }

    /// Wait until no fetch is in flight.
    pub async fn settle(&self) {
        loop {
            let idle = self.inner.idle.notified();
            if self.inner.lock_in_flight().is_empty() {
                return;
            }
            idle.await;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.inner.metrics
    }

    fn spawn_refetch<T, F, Fut>(&self, key: QueryKey, stale_time: Duration, fetcher: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (fetch, started) = self.join_or_start(&key, stale_time, fetcher);
        if !started {
            debug!("Refetch for {} already in flight", key);
            return;
        }

        tokio::spawn(async move {
            // The stale value stays in place when the refetch fails.
            if let Err(e) = fetch.await {
                warn!("Background refetch for {} failed: {}", key, e);
            }
        });
    }

    /// The fetch in flight for `key`, or a new one. The flag is true when
    /// the fetch was started by this call.
    fn join_or_start<T, F, Fut>(
        &self,
        key: &QueryKey,
        stale_time: Duration,
        fetcher: F,
    ) -> (Shared<FetchFuture>, bool)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let mut in_flight = self.inner.lock_in_flight();
        if let Some(fetch) = in_flight.get(key).and_then(|f| f.fetch.upgrade()) {
            return (fetch, false);
        }

        let id = self.inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        let guard = InFlightGuard {
            inner: Arc::clone(&self.inner),
            key: key.clone(),
            id,
        };
        let inner = Arc::clone(&self.inner);
        let owned_key = key.clone();
        let fetch = async move {
            let _guard = guard;
            let value = inner.fetch_and_store(owned_key, id, stale_time, &fetcher).await?;
            Ok::<CachedValue, ApiError>(Arc::new(value))
        }
        .boxed()
        .shared();

        if let Some(weak) = fetch.downgrade() {
            in_flight.insert(key.clone(), InFlight { id, fetch: weak });
        }
        (fetch, true)
    }
}

impl CacheInner {
    /// Run the fetcher under the retry policy and store the result, unless
    /// fetch `id` was forgotten by an invalidation in the meantime.
    async fn fetch_and_store<T, F, Fut>(
        &self,
        key: QueryKey,
        id: u64,
        stale_time: Duration,
        fetcher: &F,
    ) -> Result<T, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let operation_name = key.to_string();

        let result = with_retry_if(
            &self.retry,
            &operation_name,
            || {
                self.metrics.record_fetch();
                fetcher()
            },
            ApiError::is_retryable,
        )
        .await;

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                self.metrics.record_fetch_failure();
                return Err(e);
            }
        };

        let mut entries = self.lock_entries();
        let current = self.lock_in_flight().get(&key).is_some_and(|f| f.id == id);
        if current {
            entries.insert(
                key,
                CacheEntry {
                    value: Arc::new(value.clone()),
                    updated_at: Instant::now(),
                    stale_time,
                },
            );
        } else {
            debug!("Discarding result for {}: invalidated while in flight", key);
        }
        Ok(value)
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<QueryKey, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
