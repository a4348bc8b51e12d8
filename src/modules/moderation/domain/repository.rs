use crate::modules::moderation::domain::Moderator;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait ModeratorRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Moderator>>;

    async fn list(&self) -> AppResult<Vec<Moderator>>;

    /// Fails with a validation error when the user already has a grant
    async fn insert(&self, moderator: &Moderator) -> AppResult<Moderator>;

    async fn delete(&self, user_id: &str) -> AppResult<bool>;
}
