use super::value_objects::{AnimeKind, AnimeStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub russian: Option<String>,
}

/// List entry from catalog searches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: i64,
    pub name: String,
    pub russian: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    pub kind: Option<AnimeKind>,
    pub status: Option<AnimeStatus>,
    pub score: Option<f64>,
    pub episodes: i32,
    pub episodes_aired: i32,
    pub aired_on: Option<NaiveDate>,
    pub released_on: Option<NaiveDate>,
}

impl AnimeSummary {
    /// Russian title when present, original otherwise
    pub fn display_title(&self) -> &str {
        self.russian
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetails {
    #[serde(flatten)]
    pub summary: AnimeSummary,
    pub english: Vec<String>,
    pub japanese: Vec<String>,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub age_rating: Option<String>,
    pub duration_minutes: Option<i32>,
    pub genres: Vec<Genre>,
    pub studios: Vec<String>,
    pub franchise: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedAnime {
    pub relation: String,
    pub relation_russian: Option<String>,
    pub anime: AnimeSummary,
}
