use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

pub const AVATAR_BUCKET: &str = "avatars";

/// `{user_id}/avatar.{ext}`; re-uploads overwrite the previous file
pub fn avatar_path(user_id: &Uuid, extension: &str) -> String {
    format!("{}/avatar.{}", user_id, extension)
}

/// Object storage for user avatars
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Stores `bytes` at `path` inside `bucket`, replacing any existing
    /// object, and returns its public URL
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        access_token: Option<&str>,
    ) -> AppResult<String>;
}
