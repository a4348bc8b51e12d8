use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile; `id` is the auth user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(id: Uuid, username: String, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            email,
            avatar_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves a field untouched, an empty bio clears it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none()
    }

    pub fn apply_to(&self, profile: &mut Profile, now: DateTime<Utc>) {
        if let Some(username) = &self.username {
            profile.username = username.trim().to_string();
        }
        if let Some(bio) = &self.bio {
            let bio = bio.trim();
            profile.bio = (!bio.is_empty()).then(|| bio.to_string());
        }
        profile.updated_at = now;
    }
}
