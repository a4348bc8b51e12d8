use crate::modules::rating::domain::{Rating, RatingRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Ratings keyed by (anime, user)
#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    ratings: DashMap<(i64, Uuid), Rating>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Rating>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.anime_id == anime_id)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn find_user_rating(&self, anime_id: i64, user_id: &Uuid) -> AppResult<Option<Rating>> {
        Ok(self
            .ratings
            .get(&(anime_id, *user_id))
            .map(|r| r.value().clone()))
    }

    async fn all_scores(&self) -> AppResult<Vec<(i64, i16)>> {
        Ok(self
            .ratings
            .iter()
            .map(|r| (r.anime_id, r.rating))
            .collect())
    }

    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        rating: i16,
        now: DateTime<Utc>,
    ) -> AppResult<Rating> {
        let mut entry = self
            .ratings
            .entry((anime_id, *user_id))
            .or_insert_with(|| Rating::new(*user_id, anime_id, rating, now));
        entry.update_score(rating, now);
        Ok(entry.value().clone())
    }

    async fn delete(&self, anime_id: i64, user_id: &Uuid) -> AppResult<bool> {
        Ok(self.ratings.remove(&(anime_id, *user_id)).is_some())
    }
}
