/// Test data builders with sensible defaults
use chrono::Utc;
use shikaraka_lib::modules::catalog::{AnimeDetails, AnimeKind, AnimeStatus, AnimeSummary, Genre};
use shikaraka_lib::modules::moderation::{Moderator, ModeratorRole};
use shikaraka_lib::modules::profile::Profile;
use uuid::Uuid;

pub struct AnimeFactory {
    id: i64,
    name: String,
    russian: Option<String>,
    score: Option<f64>,
    kind: Option<AnimeKind>,
    status: Option<AnimeStatus>,
    episodes: i32,
}

impl Default for AnimeFactory {
    fn default() -> Self {
        Self {
            id: rand::random::<u16>() as i64 + 1,
            name: "Test Anime".to_string(),
            russian: None,
            score: None,
            kind: Some(AnimeKind::Tv),
            status: Some(AnimeStatus::Released),
            episodes: 12,
        }
    }
}

impl AnimeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn russian(mut self, russian: &str) -> Self {
        self.russian = Some(russian.to_string());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn build(self) -> AnimeSummary {
        AnimeSummary {
            id: self.id,
            name: self.name,
            russian: self.russian,
            image_url: None,
            preview_url: None,
            kind: self.kind,
            status: self.status,
            score: self.score,
            episodes: self.episodes,
            episodes_aired: self.episodes,
            aired_on: None,
            released_on: None,
        }
    }

    pub fn build_details(self) -> AnimeDetails {
        AnimeDetails {
            summary: self.build(),
            english: Vec::new(),
            japanese: Vec::new(),
            synonyms: Vec::new(),
            description: Some("Test description".to_string()),
            age_rating: Some("pg_13".to_string()),
            duration_minutes: Some(24),
            genres: vec![Genre {
                id: 1,
                name: "Action".to_string(),
                russian: Some("Экшен".to_string()),
            }],
            studios: vec!["Test Studio".to_string()],
            franchise: None,
        }
    }
}

pub fn profile(username: &str, email: &str) -> Profile {
    Profile::new(
        Uuid::new_v4(),
        username.to_string(),
        Some(email.to_string()),
        Utc::now(),
    )
}

pub fn grant(user_id: &Uuid, email: &str, role: ModeratorRole) -> Moderator {
    Moderator::new(user_id.to_string(), email.to_string(), role, None, Utc::now())
}
