use crate::modules::comments::domain::Comment;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Comment>>;

    /// Comments of one anime with their authors, newest first
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Comment>>;

    async fn insert(&self, comment: &Comment) -> AppResult<Comment>;

    async fn update_content(
        &self,
        id: &Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Comment>>;

    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
}
