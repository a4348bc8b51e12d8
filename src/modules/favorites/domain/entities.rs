use super::watch_status::WatchStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub status: WatchStatus,
    pub anime_title: Option<String>,
    pub anime_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to favorite an anime; title and poster are denormalized so
/// the list renders without hitting Shikimori
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub anime_id: i64,
    #[serde(default)]
    pub status: WatchStatus,
    pub anime_title: Option<String>,
    pub anime_image: Option<String>,
}

impl NewFavorite {
    pub fn new(anime_id: i64) -> Self {
        Self {
            anime_id,
            status: WatchStatus::default(),
            anime_title: None,
            anime_image: None,
        }
    }

    pub fn with_status(mut self, status: WatchStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.anime_title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.anime_image = Some(image.into());
        self
    }
}

impl Favorite {
    pub fn new(user_id: Uuid, data: NewFavorite, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            anime_id: data.anime_id,
            status: data.status,
            anime_title: data.anime_title,
            anime_image: data.anime_image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: WatchStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}
