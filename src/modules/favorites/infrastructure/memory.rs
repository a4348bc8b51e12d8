use crate::modules::favorites::domain::{Favorite, FavoriteRepository, WatchStatus};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: DashMap<(Uuid, i64), Favorite>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn find_by_user(&self, user_id: &Uuid) -> AppResult<Vec<Favorite>> {
        let mut list: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|f| f.user_id == *user_id)
            .map(|f| f.value().clone())
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }

    async fn find(&self, user_id: &Uuid, anime_id: i64) -> AppResult<Option<Favorite>> {
        Ok(self
            .favorites
            .get(&(*user_id, anime_id))
            .map(|f| f.value().clone()))
    }

    async fn upsert(&self, favorite: &Favorite) -> AppResult<Favorite> {
        let mut entry = self
            .favorites
            .entry((favorite.user_id, favorite.anime_id))
            .or_insert_with(|| favorite.clone());
        entry.status = favorite.status;
        entry.anime_title = favorite.anime_title.clone();
        entry.anime_image = favorite.anime_image.clone();
        entry.updated_at = favorite.updated_at;
        Ok(entry.value().clone())
    }

    async fn update_status(
        &self,
        user_id: &Uuid,
        anime_id: i64,
        status: WatchStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Favorite>> {
        Ok(self.favorites.get_mut(&(*user_id, anime_id)).map(|mut f| {
            f.set_status(status, now);
            f.value().clone()
        }))
    }

    async fn delete(&self, user_id: &Uuid, anime_id: i64) -> AppResult<bool> {
        Ok(self.favorites.remove(&(*user_id, anime_id)).is_some())
    }
}
