use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The dub/sub a user picked for an anime; one per (user, anime)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub voice: String,
    pub created_at: DateTime<Utc>,
}

impl VoiceSelection {
    pub fn new(user_id: Uuid, anime_id: i64, voice: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            anime_id,
            voice,
            created_at: now,
        }
    }
}
