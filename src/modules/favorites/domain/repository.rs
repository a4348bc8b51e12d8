use crate::modules::favorites::domain::{Favorite, WatchStatus};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All favorites of a user, most recently updated first
    async fn find_by_user(&self, user_id: &Uuid) -> AppResult<Vec<Favorite>>;

    async fn find(&self, user_id: &Uuid, anime_id: i64) -> AppResult<Option<Favorite>>;

    /// Insert, or refresh status/title/image of the existing (user, anime) row
    async fn upsert(&self, favorite: &Favorite) -> AppResult<Favorite>;

    async fn update_status(
        &self,
        user_id: &Uuid,
        anime_id: i64,
        status: WatchStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Favorite>>;

    async fn delete(&self, user_id: &Uuid, anime_id: i64) -> AppResult<bool>;
}
