/// Hand-written port fakes for services that need deterministic upstreams
use async_trait::async_trait;
use shikaraka_lib::modules::auth::{AuthClient, AuthSession, AuthUser};
use shikaraka_lib::modules::catalog::{
    AnimeCatalog, AnimeDetails, AnimeSummary, RelatedAnime, SearchCriteria,
};
use shikaraka_lib::modules::profile::AvatarStorage;
use shikaraka_lib::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog that serves fixed data, counts calls and can fail the first N
#[derive(Default)]
pub struct FakeCatalog {
    pub results: Vec<AnimeSummary>,
    pub details: HashMap<i64, AnimeDetails>,
    pub delay: Option<Duration>,
    failures_left: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_results(results: Vec<AnimeSummary>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn with_details(mut self, details: AnimeDetails) -> Self {
        self.details.insert(details.summary.id, details);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_lookups(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) -> AppResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(AppError::ExternalServiceError("Shikimori is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AnimeCatalog for FakeCatalog {
    async fn search(&self, _criteria: &SearchCriteria) -> AppResult<Vec<AnimeSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        Ok(self.results.clone())
    }

    async fn get_anime(&self, id: i64) -> AppResult<Option<AnimeDetails>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        Ok(self.details.get(&id).cloned())
    }

    async fn get_related(&self, _id: i64) -> AppResult<Vec<RelatedAnime>> {
        self.pause().await?;
        Ok(Vec::new())
    }
}

/// Storage that keeps uploads in memory and returns predictable URLs
#[derive(Default)]
pub struct MemoryStorage {
    pub uploads: Mutex<Vec<(String, String, usize)>>,
}

impl MemoryStorage {
    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads
            .lock()
            .map(|uploads| uploads.iter().map(|(_, path, _)| path.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AvatarStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
        _access_token: Option<&str>,
    ) -> AppResult<String> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push((bucket.to_string(), path.to_string(), bytes.len()));
        }
        Ok(format!("https://storage.test/{}/{}", bucket, path))
    }
}

/// Identity provider for tests that never authenticate
pub struct OfflineAuth;

#[async_trait]
impl AuthClient for OfflineAuth {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _username: &str,
    ) -> AppResult<(AuthUser, Option<AuthSession>)> {
        Err(AppError::ServiceUnavailable("auth offline".to_string()))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> AppResult<AuthSession> {
        Err(AppError::ServiceUnavailable("auth offline".to_string()))
    }

    async fn sign_out(&self, _access_token: &str) -> AppResult<()> {
        Ok(())
    }

    async fn current_user(&self, _access_token: &str) -> AppResult<Option<AuthUser>> {
        Ok(None)
    }
}
