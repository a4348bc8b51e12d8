use crate::log_debug;
use crate::modules::voice_stats::domain::{
    tally, VoiceSelection, VoiceSelectionRepository, VoiceStats,
};
use crate::shared::cache::{QueryCache, QueryOptions};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn stats_key(anime_id: i64) -> String {
    format!("voices:{}", anime_id)
}

pub struct VoiceStatsService {
    repo: Arc<dyn VoiceSelectionRepository>,
    cache: QueryCache<VoiceStats>,
}

impl VoiceStatsService {
    pub fn new(repo: Arc<dyn VoiceSelectionRepository>) -> Self {
        Self {
            repo,
            cache: QueryCache::new("voice-stats", QueryOptions::lists()),
        }
    }

    pub async fn get_voice_stats(&self, anime_id: i64) -> AppResult<VoiceStats> {
        Validator::validate_anime_id(anime_id)?;

        let repo = Arc::clone(&self.repo);
        self.cache
            .fetch(&stats_key(anime_id), move || async move {
                let selections = repo.find_by_anime(anime_id).await?;
                Ok(tally(selections.iter().map(|s| s.voice.as_str())))
            })
            .await
    }

    pub async fn record_selection(
        &self,
        anime_id: i64,
        user_id: &Uuid,
        voice: &str,
    ) -> AppResult<VoiceSelection> {
        Validator::validate_anime_id(anime_id)?;
        let voice = Validator::validate_voice_label(voice)?;

        let selection = self
            .repo
            .upsert(anime_id, user_id, &voice, Utc::now())
            .await?;

        self.cache.invalidate(&stats_key(anime_id));
        log_debug!(
            "Voice selection anime={} user={} voice={}",
            anime_id,
            user_id,
            selection.voice
        );
        Ok(selection)
    }
}
