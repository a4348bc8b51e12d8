/// Diesel-based implementation of FavoriteRepository
use crate::modules::favorites::domain::{Favorite, FavoriteRepository, WatchStatus};
use crate::modules::favorites::infrastructure::models::FavoriteModel;
use crate::schema::favorites;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

pub struct FavoriteRepositoryImpl {
    db: Arc<Database>,
}

impl FavoriteRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteRepositoryImpl {
    async fn find_by_user(&self, user_id: &Uuid) -> AppResult<Vec<Favorite>> {
        let user_id = *user_id;

        let rows = self
            .db
            .run(move |conn| {
                let rows = favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .order(favorites::updated_at.desc())
                    .select(FavoriteModel::as_select())
                    .load(conn)?;
                Ok(rows)
            })
            .await?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn find(&self, user_id: &Uuid, anime_id: i64) -> AppResult<Option<Favorite>> {
        let user_id = *user_id;

        let row = self
            .db
            .run(move |conn| {
                let row = favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::anime_id.eq(anime_id))
                    .select(FavoriteModel::as_select())
                    .first(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Favorite::from))
    }

    async fn upsert(&self, favorite: &Favorite) -> AppResult<Favorite> {
        let model = FavoriteModel::from(favorite);

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(favorites::table)
                    .values(&model)
                    .on_conflict((favorites::user_id, favorites::anime_id))
                    .do_update()
                    .set((
                        favorites::status.eq(excluded(favorites::status)),
                        favorites::anime_title.eq(excluded(favorites::anime_title)),
                        favorites::anime_image.eq(excluded(favorites::anime_image)),
                        favorites::updated_at.eq(excluded(favorites::updated_at)),
                    ))
                    .returning(FavoriteModel::as_returning())
                    .get_result(conn)?;
                Ok(row)
            })
            .await?;

        Ok(Favorite::from(saved))
    }

    async fn update_status(
        &self,
        user_id: &Uuid,
        anime_id: i64,
        status: WatchStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Favorite>> {
        let user_id = *user_id;

        let row = self
            .db
            .run(move |conn| {
                let row = diesel::update(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::anime_id.eq(anime_id)),
                )
                .set((favorites::status.eq(status), favorites::updated_at.eq(now)))
                .returning(FavoriteModel::as_returning())
                .get_result(conn)
                .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(Favorite::from))
    }

    async fn delete(&self, user_id: &Uuid, anime_id: i64) -> AppResult<bool> {
        let user_id = *user_id;

        self.db
            .run(move |conn| {
                let removed = diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::anime_id.eq(anime_id)),
                )
                .execute(conn)?;
                Ok(removed > 0)
            })
            .await
    }
}
