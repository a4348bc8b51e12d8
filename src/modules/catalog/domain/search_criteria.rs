use super::value_objects::{AnimeKind, AnimeStatus, SearchOrder};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Largest page Shikimori serves
pub const MAX_PAGE_LIMIT: u32 = 50;

fn season_regex() -> &'static Regex {
    static SEASON: OnceLock<Regex> = OnceLock::new();
    SEASON.get_or_init(|| {
        Regex::new(r"^!?((winter|spring|summer|fall)_\d{4}|\d{4}(_\d{4})?|\d{3}x)$")
            .expect("season pattern is valid")
    })
}

/// Filters for `GET /api/animes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub search: Option<String>,
    #[serde(default)]
    pub genre: Vec<i64>,
    pub kind: Option<AnimeKind>,
    pub status: Option<AnimeStatus>,
    /// `summer_2017`, `2016`, `2014_2016` or `199x`; comma separated,
    /// `!` excludes
    pub season: Option<String>,
    #[serde(default)]
    pub order: SearchOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            search: None,
            genre: Vec::new(),
            kind: None,
            status: None,
            season: None,
            order: SearchOrder::default(),
            page: 1,
            limit: 20,
        }
    }
}

impl SearchCriteria {
    pub fn query(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn with_kind(mut self, kind: AnimeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: AnimeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_genres(mut self, genres: Vec<i64>) -> Self {
        self.genre = genres;
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_pagination(self.page, self.limit)?;

        if let Some(season) = &self.season {
            let valid = season
                .split(',')
                .all(|part| season_regex().is_match(part.trim()));
            if !valid {
                return Err(AppError::ValidationError(format!(
                    "Invalid season filter: {}",
                    season
                )));
            }
        }

        if self.genre.iter().any(|g| *g <= 0) {
            return Err(AppError::ValidationError(
                "Genre ids must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Query-string pairs in a stable order (also used as the cache key)
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("order", self.order.as_str().to_string()),
        ];

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if !self.genre.is_empty() {
            let genres: Vec<String> = self.genre.iter().map(|g| g.to_string()).collect();
            pairs.push(("genre", genres.join(",")));
        }
        if let Some(kind) = self.kind {
            pairs.push(("kind", kind.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(season) = &self.season {
            pairs.push(("season", season.replace(' ', "")));
        }

        pairs
    }

    pub fn cache_key(&self) -> String {
        let query: Vec<String> = self
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect();
        format!("animes:{}", query.join("&"))
    }
}
