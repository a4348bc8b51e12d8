use super::entities::{AnimeDetails, AnimeSummary, RelatedAnime};
use super::search_criteria::SearchCriteria;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Read-only anime catalog
#[async_trait]
pub trait AnimeCatalog: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<AnimeSummary>>;

    /// `None` when the id is unknown
    async fn get_anime(&self, id: i64) -> AppResult<Option<AnimeDetails>>;

    /// Related titles; manga relations are skipped
    async fn get_related(&self, id: i64) -> AppResult<Vec<RelatedAnime>>;
}
