use crate::shared::errors::{AppError, AppResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Freshness and retention settings for a cache
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Entries younger than this are served without refetching
    pub stale_time: Duration,
    /// Entries not read for this long are dropped by `purge_expired`
    pub gc_time: Duration,
}

impl QueryOptions {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            stale_time,
            gc_time,
        }
    }

    /// Catalog lists and user-owned lists
    pub fn lists() -> Self {
        Self::new(Duration::from_secs(5 * 60), Duration::from_secs(30 * 60))
    }

    /// Single-entity lookups that rarely change
    pub fn details() -> Self {
        Self::new(Duration::from_secs(10 * 60), Duration::from_secs(60 * 60))
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::lists()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    updated_at: Instant,
    last_access: Instant,
}

type SharedFetch<V> = Shared<BoxFuture<'static, AppResult<V>>>;

struct InFlight<V> {
    id: u64,
    fetch: SharedFetch<V>,
    token: CancellationToken,
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub deduplicated: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Keyed query cache with stale/gc times and de-duplication of concurrent
/// fetches for the same key.
///
/// Invalidating a key cancels its in-flight fetch; awaiters then receive
/// whatever is cached at that moment, or `AppError::Cancelled`.
pub struct QueryCache<V> {
    name: &'static str,
    entries: DashMap<String, CacheEntry<V>>,
    in_flight: DashMap<String, InFlight<V>>,
    options: QueryOptions,
    next_fetch_id: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    deduplicated: AtomicU64,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, options: QueryOptions) -> Self {
        Self {
            name,
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            options,
            next_fetch_id: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Returns the fresh cached value or runs `fetcher`, sharing one fetch
    /// among all concurrent callers of the same key.
    pub async fn fetch<F, Fut>(&self, key: &str, fetcher: F) -> AppResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<V>> + Send + 'static,
    {
        if let Some(value) = self.fresh_value(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("{} cache hit: {}", self.name, key);
            return Ok(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let (id, fetch) = match self.in_flight.entry(key.to_string()) {
            Entry::Occupied(existing) => {
                self.deduplicated.fetch_add(1, Ordering::Relaxed);
                debug!("{} joined in-flight fetch: {}", self.name, key);
                (existing.get().id, existing.get().fetch.clone())
            }
            Entry::Vacant(slot) => {
                let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                let token = CancellationToken::new();
                let cancelled = token.clone();
                let name = self.name;
                let request = fetcher();
                let fetch = async move {
                    tokio::select! {
                        _ = cancelled.cancelled() => {
                            Err(AppError::Cancelled(format!("{} query cancelled", name)))
                        }
                        result = request => result,
                    }
                }
                .boxed()
                .shared();
                slot.insert(InFlight {
                    id,
                    fetch: fetch.clone(),
                    token,
                });
                (id, fetch)
            }
        };

        let result = fetch.await;

        // Only the first awaiter to finish publishes, and only if nobody
        // invalidated the key meanwhile.
        if self.in_flight.remove_if(key, |_, f| f.id == id).is_some() {
            if let Ok(value) = &result {
                self.set_query_data(key, value.clone());
            }
        }

        match result {
            Err(AppError::Cancelled(reason)) => self
                .get_query_data(key)
                .ok_or(AppError::Cancelled(reason)),
            other => other,
        }
    }

    fn fresh_value(&self, key: &str) -> Option<V> {
        let mut entry = self.entries.get_mut(key)?;
        if entry.updated_at.elapsed() <= self.options.stale_time {
            entry.last_access = Instant::now();
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Cached value regardless of staleness
    pub fn get_query_data(&self, key: &str) -> Option<V> {
        let mut entry = self.entries.get_mut(key)?;
        entry.last_access = Instant::now();
        Some(entry.value.clone())
    }

    pub fn set_query_data(&self, key: &str, value: V) {
        let now = Instant::now();
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                updated_at: now,
                last_access: now,
            },
        );
    }

    /// Applies `patch` to the cached value in place; returns false when
    /// nothing is cached under `key`.
    pub fn update_query_data<P>(&self, key: &str, patch: P) -> bool
    where
        P: FnOnce(&mut V),
    {
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                patch(&mut entry.value);
                entry.updated_at = Instant::now();
                entry.last_access = entry.updated_at;
                true
            }
            None => false,
        }
    }

    pub fn remove_query_data(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Cancels an in-flight fetch without touching cached data
    pub fn cancel(&self, key: &str) {
        if let Some((_, in_flight)) = self.in_flight.remove(key) {
            in_flight.token.cancel();
            debug!("{} cancelled in-flight fetch: {}", self.name, key);
        }
    }

    /// Drops the entry and cancels its fetch so the next read goes upstream
    pub fn invalidate(&self, key: &str) {
        self.cancel(key);
        self.entries.remove(key);
    }

    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .in_flight
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        for key in keys {
            self.cancel(&key);
        }

        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        before - self.entries.len()
    }

    pub fn is_fetching(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Removes entries not read within the gc time
    pub fn purge_expired(&self) -> usize {
        let gc_time = self.options.gc_time;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_access.elapsed() <= gc_time);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("{} purged {} expired entries", self.name, removed);
        }
        removed
    }

    /// Periodic gc; the task exits once the cache is dropped
    pub fn spawn_gc(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match weak.upgrade() {
                    Some(cache) => {
                        cache.purge_expired();
                    }
                    None => break,
                }
            }
        })
    }

    pub fn clear(&self) {
        for entry in self.in_flight.iter() {
            entry.token.cancel();
        }
        self.in_flight.clear();
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn cache(stale: Duration) -> QueryCache<u32> {
        QueryCache::new("test", QueryOptions::new(stale, Duration::from_secs(60)))
    }

    #[tokio::test]
    async fn fresh_entries_skip_the_fetcher() {
        let cache = cache(Duration::from_secs(60));
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let v = cache
                .fetch("k", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(5)
                })
                .await
                .unwrap();
            assert_eq!(v, 5);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 2);
    }

    #[tokio::test]
    async fn stale_entries_are_refetched() {
        let cache = cache(Duration::ZERO);
        cache.set_query_data("k", 1);
        tokio::time::sleep(Duration::from_millis(2)).await;
        let v = cache.fetch("k", || async { Ok(2) }).await.unwrap();
        assert_eq!(v, 2);
        assert_eq!(cache.get_query_data("k"), Some(2));
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_request() {
        let cache = cache(Duration::from_secs(60));
        let calls = Arc::new(AtomicU32::new(0));

        let make = |calls: Arc<AtomicU32>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(9)
            }
        };

        let (a, b) = tokio::join!(
            cache.fetch("k", make(calls.clone())),
            cache.fetch("k", make(calls.clone()))
        );

        assert_eq!(a.unwrap(), 9);
        assert_eq!(b.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().deduplicated, 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = cache(Duration::from_secs(60));
        let err = cache
            .fetch("k", || async { Err(AppError::ExternalServiceError("down".into())) })
            .await;
        assert!(err.is_err());
        assert!(cache.get_query_data("k").is_none());
        assert!(!cache.is_fetching("k"));
    }

    #[tokio::test]
    async fn invalidate_cancels_in_flight_fetch() {
        let cache = Arc::new(cache(Duration::from_secs(60)));

        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .fetch("k", || async {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        Ok(1)
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.is_fetching("k"));
        cache.invalidate("k");

        let result = reader.await.unwrap();
        assert!(matches!(result, Err(AppError::Cancelled(_))));
        assert!(cache.get_query_data("k").is_none());
    }

    #[test]
    fn invalidate_prefix_only_hits_matching_keys() {
        let cache = cache(Duration::from_secs(60));
        cache.set_query_data("comments:1", 1);
        cache.set_query_data("comments:2", 2);
        cache.set_query_data("favorites:1", 3);

        assert_eq!(cache.invalidate_prefix("comments:"), 2);
        assert_eq!(cache.get_query_data("favorites:1"), Some(3));
    }

    #[test]
    fn purge_drops_entries_past_gc_time() {
        let cache: QueryCache<u32> =
            QueryCache::new("gc", QueryOptions::new(Duration::ZERO, Duration::ZERO));
        cache.set_query_data("a", 1);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.stats().entries_count, 0);
    }
}
