// Shikimori REST API v1 payloads (https://shikimori.one/api/doc/1.0)

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageSet {
    pub original: Option<String>,
    pub preview: Option<String>,
    pub x96: Option<String>,
    pub x48: Option<String>,
}

/// Entry of `GET /api/animes`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimeShort {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub russian: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSet>,
    #[serde(default)]
    pub kind: Option<String>,
    /// Decimal string such as "8.62"; "0.0" when unscored
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub episodes: i32,
    #[serde(default)]
    pub episodes_aired: i32,
    #[serde(default)]
    pub aired_on: Option<String>,
    #[serde(default)]
    pub released_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub russian: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudioDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub filtered_name: Option<String>,
}

/// `GET /api/animes/:id`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimeFull {
    #[serde(flatten)]
    pub short: AnimeShort,
    #[serde(default)]
    pub english: Vec<Option<String>>,
    #[serde(default)]
    pub japanese: Vec<Option<String>>,
    #[serde(default)]
    pub synonyms: Vec<Option<String>>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub franchise: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
    #[serde(default)]
    pub studios: Vec<StudioDto>,
}

/// Entry of `GET /api/animes/:id/related`; exactly one of anime/manga is set
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedDto {
    pub relation: String,
    #[serde(default)]
    pub relation_russian: Option<String>,
    #[serde(default)]
    pub anime: Option<AnimeShort>,
    #[serde(default)]
    pub manga: Option<serde_json::Value>,
}
