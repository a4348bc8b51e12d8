use crate::modules::voice_stats::domain::{VoiceSelection, VoiceSelectionRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;
use uuid::Uuid;

/// Insertion-ordered selections, so tie order matches the database's
/// `created_at` ordering
#[derive(Debug, Default)]
pub struct InMemoryVoiceSelectionRepository {
    selections: RwLock<Vec<VoiceSelection>>,
}

impl InMemoryVoiceSelectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoiceSelectionRepository for InMemoryVoiceSelectionRepository {
    async fn find_by_anime(&self, anime_id: i64) -> AppResult<Vec<VoiceSelection>> {
        let selections = self.selections.read().map_err(poisoned)?;
        Ok(selections
            .iter()
            .filter(|s| s.anime_id == anime_id)
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        voice: &str,
        now: DateTime<Utc>,
    ) -> AppResult<VoiceSelection> {
        let mut selections = self.selections.write().map_err(poisoned)?;
        if let Some(existing) = selections
            .iter_mut()
            .find(|s| s.anime_id == anime_id && s.user_id == *user_id)
        {
            existing.voice = voice.to_string();
            return Ok(existing.clone());
        }

        let selection = VoiceSelection::new(*user_id, anime_id, voice.to_string(), now);
        selections.push(selection.clone());
        Ok(selection)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> crate::shared::errors::AppError {
    crate::shared::errors::AppError::InternalError("voice selection store poisoned".to_string())
}
