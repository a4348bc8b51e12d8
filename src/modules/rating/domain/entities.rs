use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's 1..=10 score for an anime; one per (user, anime)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub anime_id: i64,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(user_id: Uuid, anime_id: i64, rating: i16, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            anime_id,
            rating,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_score(&mut self, rating: i16, now: DateTime<Utc>) {
        self.rating = rating;
        self.updated_at = now;
    }
}

/// Aggregate score of one anime, derived on every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRating {
    /// Plain mean, 0 when unrated
    pub average: f64,
    /// Bayesian mean pulled towards the global average
    pub weighted: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRatedAnime {
    pub anime_id: i64,
    pub average: f64,
    pub weighted: f64,
    pub count: i64,
}
