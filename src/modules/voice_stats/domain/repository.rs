use crate::modules::voice_stats::domain::VoiceSelection;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait VoiceSelectionRepository: Send + Sync {
    /// Selections for one anime, oldest first
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<VoiceSelection>>;

    /// Replace the user's selection for the anime, inserting when missing
    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        voice: &str,
        now: DateTime<Utc>,
    ) -> AppResult<VoiceSelection>;
}
