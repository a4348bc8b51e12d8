//! Snapshot, speculatively patch, then reconcile or roll back.

use super::query_cache::QueryCache;
use crate::shared::errors::AppResult;
use crate::shared::http::{with_retry, RetryPolicy};
use std::future::Future;
use tracing::warn;

/// A speculative patch applied to one cache key.
///
/// Dropping the guard without calling `commit` restores the snapshot.
pub struct OptimisticUpdate<'a, V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: &'a QueryCache<V>,
    key: String,
    snapshot: Option<V>,
    settled: bool,
}

impl<'a, V> OptimisticUpdate<'a, V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Cancels any in-flight fetch for `key` (so it can't overwrite the
    /// patch), captures the current value and patches it in place.
    /// Keys with nothing cached are left alone.
    pub fn apply<P>(cache: &'a QueryCache<V>, key: &str, patch: P) -> Self
    where
        P: FnOnce(&mut V),
    {
        cache.cancel(key);
        let snapshot = cache.get_query_data(key);
        cache.update_query_data(key, patch);

        Self {
            cache,
            key: key.to_string(),
            snapshot,
            settled: false,
        }
    }

    pub fn snapshot(&self) -> Option<&V> {
        self.snapshot.as_ref()
    }

    /// Mutation succeeded: drop the speculative value so the next read
    /// reconciles with the server.
    pub fn commit(mut self) {
        self.settled = true;
        self.cache.invalidate(&self.key);
    }

    /// Mutation failed: put the captured snapshot back
    pub fn rollback(mut self) {
        self.settled = true;
        self.restore();
    }

    fn restore(&mut self) {
        match self.snapshot.take() {
            Some(previous) => self.cache.set_query_data(&self.key, previous),
            None => {
                self.cache.remove_query_data(&self.key);
            }
        }
    }
}

impl<V> Drop for OptimisticUpdate<'_, V>
where
    V: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.settled {
            self.restore();
        }
    }
}

/// Runs `mutation` (retried per `policy`) behind an optimistic patch of
/// `key`, committing on success and rolling back on failure.
pub async fn mutate_optimistically<V, T, P, M, Fut>(
    cache: &QueryCache<V>,
    key: &str,
    patch: P,
    mutation: M,
    policy: &RetryPolicy,
    operation_name: &str,
) -> AppResult<T>
where
    V: Clone + Send + Sync + 'static,
    P: FnOnce(&mut V),
    M: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let update = OptimisticUpdate::apply(cache, key, patch);

    match with_retry(mutation, policy, operation_name).await {
        Ok(result) => {
            update.commit();
            Ok(result)
        }
        Err(error) => {
            warn!(
                "{} failed, rolling back optimistic update of {}: {}",
                operation_name, key, error
            );
            update.rollback();
            Err(error)
        }
    }
}
