/// Diesel-based implementation of RatingRepository
use crate::modules::rating::domain::{Rating, RatingRepository};
use crate::modules::rating::infrastructure::models::RatingModel;
use crate::schema::ratings;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

pub struct RatingRepositoryImpl {
    db: Arc<Database>,
}

impl RatingRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Rating>> {
        let models = self
            .db
            .run(move |conn| {
                let rows = ratings::table
                    .filter(ratings::anime_id.eq(anime_id))
                    .select(RatingModel::as_select())
                    .load(conn)?;
                Ok(rows)
            })
            .await?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn find_user_rating(&self, anime_id: i64, user_id: &Uuid) -> AppResult<Option<Rating>> {
        let user_id = *user_id;

        let model = self
            .db
            .run(move |conn| {
                let row = ratings::table
                    .filter(ratings::anime_id.eq(anime_id))
                    .filter(ratings::user_id.eq(user_id))
                    .select(RatingModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(model.map(Rating::from))
    }

    async fn all_scores(&self) -> AppResult<Vec<(i64, i16)>> {
        self.db
            .run(|conn| {
                let rows = ratings::table
                    .select((ratings::anime_id, ratings::rating))
                    .load::<(i64, i16)>(conn)?;
                Ok(rows)
            })
            .await
    }

    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        rating: i16,
        now: DateTime<Utc>,
    ) -> AppResult<Rating> {
        let model = RatingModel::from(&Rating::new(*user_id, anime_id, rating, now));

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(ratings::table)
                    .values(&model)
                    .on_conflict((ratings::user_id, ratings::anime_id))
                    .do_update()
                    .set((
                        ratings::rating.eq(excluded(ratings::rating)),
                        ratings::updated_at.eq(excluded(ratings::updated_at)),
                    ))
                    .returning(RatingModel::as_returning())
                    .get_result(conn)?;
                Ok(row)
            })
            .await?;

        Ok(Rating::from(saved))
    }

    async fn delete(&self, anime_id: i64, user_id: &Uuid) -> AppResult<bool> {
        let user_id = *user_id;

        self.db
            .run(move |conn| {
                let removed = diesel::delete(
                    ratings::table
                        .filter(ratings::anime_id.eq(anime_id))
                        .filter(ratings::user_id.eq(user_id)),
                )
                .execute(conn)?;
                Ok(removed > 0)
            })
            .await
    }
}
