use crate::modules::rate_limit::domain::{ActionType, RateLimitRecord};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence for limiter state, one row per (user, action type)
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &Uuid,
        action_type: ActionType,
    ) -> AppResult<Option<RateLimitRecord>>;

    /// Insert or replace the row for the record's (user, action type)
    async fn save(&self, record: &RateLimitRecord) -> AppResult<()>;

    /// Returns true when a row was removed
    async fn delete(&self, user_id: &Uuid, action_type: ActionType) -> AppResult<bool>;

    /// Removes unblocked rows whose window started before `before`
    async fn delete_stale(&self, before: DateTime<Utc>) -> AppResult<usize>;
}
