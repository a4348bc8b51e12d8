use crate::modules::profile::domain::Profile;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Profile>>;

    /// Case-insensitive email lookup
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Profile>>;

    /// Insert a new profile or overwrite the editable fields of an existing one
    async fn save(&self, profile: &Profile) -> AppResult<Profile>;

    async fn set_avatar_url(
        &self,
        id: &Uuid,
        avatar_url: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Profile>>;
}
