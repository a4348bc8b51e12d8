use crate::modules::catalog::domain::{
    AnimeCatalog, AnimeDetails, AnimeSummary, RelatedAnime, SearchCriteria,
};
use crate::shared::cache::{CacheStats, QueryCache, QueryOptions};
use crate::shared::errors::AppResult;
use crate::shared::http::{with_retry, RetryPolicy};
use crate::shared::utils::{LogContext, Validator};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Catalog reads behind query caches: lists stay fresh for 5 minutes,
/// details and relations for 10
pub struct CatalogService {
    catalog: Arc<dyn AnimeCatalog>,
    lists: Arc<QueryCache<Vec<AnimeSummary>>>,
    details: Arc<QueryCache<Option<AnimeDetails>>>,
    related: Arc<QueryCache<Vec<RelatedAnime>>>,
    read_policy: RetryPolicy,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn AnimeCatalog>) -> Self {
        Self {
            catalog,
            lists: Arc::new(QueryCache::new("catalog-lists", QueryOptions::lists())),
            details: Arc::new(QueryCache::new("catalog-details", QueryOptions::details())),
            related: Arc::new(QueryCache::new("catalog-related", QueryOptions::details())),
            read_policy: RetryPolicy::catalog(),
        }
    }

    /// The only retry layer for catalog reads; zero keeps failures immediate
    pub fn with_read_policy(mut self, policy: RetryPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    pub async fn search_anime(&self, criteria: &SearchCriteria) -> AppResult<Vec<AnimeSummary>> {
        criteria.validate()?;

        let catalog = Arc::clone(&self.catalog);
        let policy = self.read_policy.clone();
        let owned = criteria.clone();
        let results = self
            .lists
            .fetch(&criteria.cache_key(), move || async move {
                with_retry(|| catalog.search(&owned), &policy, "catalog search").await
            })
            .await?;

        LogContext::search_operation(
            criteria.search.as_deref().unwrap_or(""),
            Some(results.len()),
        );
        Ok(results)
    }

    pub async fn get_anime(&self, id: i64) -> AppResult<Option<AnimeDetails>> {
        Validator::validate_anime_id(id)?;

        let catalog = Arc::clone(&self.catalog);
        let policy = self.read_policy.clone();
        self.details
            .fetch(&format!("anime:{}", id), move || async move {
                with_retry(|| catalog.get_anime(id), &policy, "catalog details").await
            })
            .await
    }

    pub async fn get_related(&self, id: i64) -> AppResult<Vec<RelatedAnime>> {
        Validator::validate_anime_id(id)?;

        let catalog = Arc::clone(&self.catalog);
        let policy = self.read_policy.clone();
        self.related
            .fetch(&format!("related:{}", id), move || async move {
                with_retry(|| catalog.get_related(id), &policy, "catalog related").await
            })
            .await
    }

    /// Drops every cached catalog response
    pub fn invalidate_all(&self) {
        self.lists.clear();
        self.details.clear();
        self.related.clear();
    }

    /// Starts periodic eviction of entries unused past their gc time
    pub fn spawn_gc(&self, interval: Duration) -> Vec<JoinHandle<()>> {
        vec![
            self.lists.spawn_gc(interval),
            self.details.spawn_gc(interval),
            self.related.spawn_gc(interval),
        ]
    }

    pub fn cache_stats(&self) -> CacheStats {
        let (a, b, c) = (self.lists.stats(), self.details.stats(), self.related.stats());
        CacheStats {
            hits: a.hits + b.hits + c.hits,
            misses: a.misses + b.misses + c.misses,
            deduplicated: a.deduplicated + b.deduplicated + c.deduplicated,
            entries_count: a.entries_count + b.entries_count + c.entries_count,
        }
    }
}
