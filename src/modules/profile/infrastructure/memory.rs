use crate::modules::profile::domain::{Profile, ProfileRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: DashMap<Uuid, Profile>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get(id).map(|p| p.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .profiles
            .iter()
            .find(|p| p.email.as_deref().map(str::to_lowercase).as_deref() == Some(email.as_str()))
            .map(|p| p.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Profile>> {
        Ok(self
            .profiles
            .iter()
            .find(|p| p.username == username)
            .map(|p| p.value().clone()))
    }

    async fn save(&self, profile: &Profile) -> AppResult<Profile> {
        let mut entry = self
            .profiles
            .entry(profile.id)
            .or_insert_with(|| profile.clone());
        entry.username = profile.username.clone();
        entry.bio = profile.bio.clone();
        entry.updated_at = profile.updated_at;
        Ok(entry.value().clone())
    }

    async fn set_avatar_url(
        &self,
        id: &Uuid,
        avatar_url: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get_mut(id).map(|mut p| {
            p.avatar_url = Some(avatar_url.to_string());
            p.updated_at = now;
            p.value().clone()
        }))
    }
}
