use crate::modules::favorites::domain::{Favorite, FavoriteRepository, NewFavorite, WatchStatus};
use crate::shared::cache::{mutate_optimistically, QueryCache, QueryOptions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::RetryPolicy;
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn favorites_key(user_id: &Uuid) -> String {
    format!("favorites:{}", user_id)
}

/// A user's favorites list. Reads go through one cached list per user and
/// every mutation patches that list before the write lands.
pub struct FavoritesService {
    repo: Arc<dyn FavoriteRepository>,
    cache: QueryCache<Vec<Favorite>>,
    mutation_policy: RetryPolicy,
}

impl FavoritesService {
    pub fn new(repo: Arc<dyn FavoriteRepository>) -> Self {
        Self {
            repo,
            cache: QueryCache::new("favorites", QueryOptions::lists()),
            mutation_policy: RetryPolicy::mutations(),
        }
    }

    pub fn with_mutation_policy(mut self, policy: RetryPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    /// Cached list, optionally narrowed to one status
    pub async fn list_favorites(
        &self,
        user_id: &Uuid,
        status: Option<WatchStatus>,
    ) -> AppResult<Vec<Favorite>> {
        let all = self.load(user_id).await?;
        Ok(match status {
            Some(status) => all.into_iter().filter(|f| f.status == status).collect(),
            None => all,
        })
    }

    pub async fn is_favorite(&self, user_id: &Uuid, anime_id: i64) -> AppResult<bool> {
        let all = self.load(user_id).await?;
        Ok(all.iter().any(|f| f.anime_id == anime_id))
    }

    /// Adds the anime, or refreshes status and metadata when already present
    pub async fn add_favorite(&self, user_id: &Uuid, data: NewFavorite) -> AppResult<Favorite> {
        Validator::validate_anime_id(data.anime_id)?;

        let now = Utc::now();
        let favorite = Favorite::new(*user_id, data, now);
        let optimistic = favorite.clone();

        let saved = mutate_optimistically(
            &self.cache,
            &favorites_key(user_id),
            move |list| {
                list.retain(|f| f.anime_id != optimistic.anime_id);
                list.insert(0, optimistic);
            },
            || self.repo.upsert(&favorite),
            &self.mutation_policy,
            "add favorite",
        )
        .await?;

        log_info!(
            "User {} added anime {} to favorites ({})",
            user_id,
            saved.anime_id,
            saved.status
        );
        Ok(saved)
    }

    pub async fn remove_favorite(&self, user_id: &Uuid, anime_id: i64) -> AppResult<bool> {
        let removed = mutate_optimistically(
            &self.cache,
            &favorites_key(user_id),
            |list| list.retain(|f| f.anime_id != anime_id),
            || self.repo.delete(user_id, anime_id),
            &self.mutation_policy,
            "remove favorite",
        )
        .await?;

        log_debug!(
            "Remove favorite user={} anime={} removed={}",
            user_id,
            anime_id,
            removed
        );
        Ok(removed)
    }

    pub async fn update_watch_status(
        &self,
        user_id: &Uuid,
        anime_id: i64,
        status: WatchStatus,
    ) -> AppResult<Favorite> {
        let now = Utc::now();

        let updated = mutate_optimistically(
            &self.cache,
            &favorites_key(user_id),
            |list| {
                if let Some(favorite) = list.iter_mut().find(|f| f.anime_id == anime_id) {
                    favorite.set_status(status, now);
                }
            },
            move || async move {
                self.repo
                    .update_status(user_id, anime_id, status, now)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Anime {} is not in favorites", anime_id))
                    })
            },
            &self.mutation_policy,
            "update watch status",
        )
        .await?;

        log_debug!(
            "Watch status user={} anime={} -> {}",
            user_id,
            anime_id,
            status
        );
        Ok(updated)
    }

    async fn load(&self, user_id: &Uuid) -> AppResult<Vec<Favorite>> {
        let repo = Arc::clone(&self.repo);
        let owner = *user_id;
        self.cache
            .fetch(&favorites_key(user_id), move || async move {
                repo.find_by_user(&owner).await
            })
            .await
    }
}
