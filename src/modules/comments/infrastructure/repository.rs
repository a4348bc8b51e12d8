/// Diesel-based implementation of CommentRepository
use crate::modules::comments::domain::{Comment, CommentRepository};
use crate::modules::comments::infrastructure::models::CommentModel;
use crate::schema::{comments, profiles};
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::Database;
use crate::shared::utils::logger::LogContext;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

type AuthorColumns = (String, Option<String>);

pub struct CommentRepositoryImpl {
    db: Arc<Database>,
}

impl CommentRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for CommentRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Comment>> {
        let id = *id;

        let row = self
            .db
            .run(move |conn| {
                let row = comments::table
                    .left_join(profiles::table)
                    .filter(comments::id.eq(id))
                    .select((
                        CommentModel::as_select(),
                        (profiles::username, profiles::avatar_url).nullable(),
                    ))
                    .first::<(CommentModel, Option<AuthorColumns>)>(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(|(model, author)| model.into_comment(author)))
    }

    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Comment>> {
        let started = Instant::now();

        let rows = self
            .db
            .run(move |conn| {
                let rows = comments::table
                    .left_join(profiles::table)
                    .filter(comments::anime_id.eq(anime_id))
                    .order((comments::created_at.desc(), comments::id.desc()))
                    .select((
                        CommentModel::as_select(),
                        (profiles::username, profiles::avatar_url).nullable(),
                    ))
                    .load::<(CommentModel, Option<AuthorColumns>)>(conn)?;
                Ok(rows)
            })
            .await?;

        LogContext::db_operation(
            "select",
            "comments",
            Some(started.elapsed().as_millis() as u64),
        );
        Ok(rows
            .into_iter()
            .map(|(model, author)| model.into_comment(author))
            .collect())
    }

    async fn insert(&self, comment: &Comment) -> AppResult<Comment> {
        let model = CommentModel::from(comment);

        let saved = self
            .db
            .run(move |conn| {
                let row = diesel::insert_into(comments::table)
                    .values(&model)
                    .returning(CommentModel::as_returning())
                    .get_result(conn)?;
                Ok(row)
            })
            .await?;

        Ok(saved.into_comment(None))
    }

    async fn update_content(
        &self,
        id: &Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Comment>> {
        let id = *id;
        let content = content.to_string();

        let row = self
            .db
            .run(move |conn| {
                let row = diesel::update(comments::table.find(id))
                    .set((comments::content.eq(content), comments::updated_at.eq(now)))
                    .returning(CommentModel::as_returning())
                    .get_result(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        Ok(row.map(|model| model.into_comment(None)))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let id = *id;

        self.db
            .run(move |conn| {
                let removed = diesel::delete(comments::table.find(id)).execute(conn)?;
                Ok(removed > 0)
            })
            .await
    }
}
