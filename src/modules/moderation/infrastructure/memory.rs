use crate::modules::moderation::domain::{Moderator, ModeratorRepository};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct InMemoryModeratorRepository {
    moderators: DashMap<String, Moderator>,
}

impl InMemoryModeratorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a grant directly, bypassing the admin check
    pub fn with_moderator(self, moderator: Moderator) -> Self {
        self.moderators.insert(moderator.user_id.clone(), moderator);
        self
    }
}

#[async_trait]
impl ModeratorRepository for InMemoryModeratorRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Moderator>> {
        Ok(self.moderators.get(user_id).map(|m| m.value().clone()))
    }

    async fn list(&self) -> AppResult<Vec<Moderator>> {
        let mut list: Vec<Moderator> = self.moderators.iter().map(|m| m.value().clone()).collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    async fn insert(&self, moderator: &Moderator) -> AppResult<Moderator> {
        match self.moderators.entry(moderator.user_id.clone()) {
            Entry::Occupied(_) => Err(AppError::ValidationError(format!(
                "{} is already a moderator",
                moderator.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(moderator.clone());
                Ok(moderator.clone())
            }
        }
    }

    async fn delete(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.moderators.remove(user_id).is_some())
    }
}
