use crate::modules::rate_limit::domain::{ActionType, RateLimitRecord, RateLimitRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Process-local limiter state (offline mode and tests)
#[derive(Debug, Default)]
pub struct InMemoryRateLimitRepository {
    records: DashMap<(Uuid, ActionType), RateLimitRecord>,
}

impl InMemoryRateLimitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RateLimitRepository for InMemoryRateLimitRepository {
    async fn find(
        &self,
        user_id: &Uuid,
        action_type: ActionType,
    ) -> AppResult<Option<RateLimitRecord>> {
        Ok(self
            .records
            .get(&(*user_id, action_type))
            .map(|r| r.value().clone()))
    }

    async fn save(&self, record: &RateLimitRecord) -> AppResult<()> {
        self.records
            .insert((record.user_id, record.action_type), record.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<bool> {
        Ok(self.records.remove(&(*user_id, action_type)).is_some())
    }

    async fn delete_stale(&self, before: DateTime<Utc>) -> AppResult<usize> {
        let before_len = self.records.len();
        self.records.retain(|_, r| !r.is_stale(before));
        Ok(before_len - self.records.len())
    }
}
