use crate::modules::comments::domain::{Comment, CommentRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: DashMap<Uuid, Comment>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Comment>> {
        Ok(self.comments.get(id).map(|c| c.value().clone()))
    }

    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<Comment>> {
        let mut list: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.anime_id == anime_id)
            .map(|c| c.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn insert(&self, comment: &Comment) -> AppResult<Comment> {
        self.comments.insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn update_content(
        &self,
        id: &Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Comment>> {
        Ok(self.comments.get_mut(id).map(|mut c| {
            c.edit(content.to_string(), now);
            c.value().clone()
        }))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.comments.remove(id).is_some())
    }
}
