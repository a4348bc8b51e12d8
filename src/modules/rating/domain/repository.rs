use crate::modules::rating::domain::Rating;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Rating>>;

    async fn find_user_rating(&self, anime_id: i64, user_id: &Uuid) -> AppResult<Option<Rating>>;

    /// Every stored score as (anime_id, rating), for global scans
    async fn all_scores(&self) -> AppResult<Vec<(i64, i16)>>;

    /// Update the (anime, user) row if present, insert otherwise
    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        rating: i16,
        now: DateTime<Utc>,
    ) -> AppResult<Rating>;

    async fn delete(&self, anime_id: i64, user_id: &Uuid) -> AppResult<bool>;
}
