use super::mapper::ShikimoriMapper;
use super::models::{AnimeFull, AnimeShort, RelatedDto};
use crate::modules::catalog::domain::{
    AnimeCatalog, AnimeDetails, AnimeSummary, RelatedAnime, SearchCriteria,
};
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;
use crate::shared::http::RateLimitClient;
use async_trait::async_trait;

const NO_QUERY: &[(&str, &str)] = &[];

/// Shikimori REST API adapter
pub struct ShikimoriCatalog {
    http_client: RateLimitClient,
    base_url: String,
    mapper: ShikimoriMapper,
}

impl ShikimoriCatalog {
    pub fn new(base_url: &str, user_agent: &str) -> AppResult<Self> {
        Ok(Self::with_client(
            RateLimitClient::for_shikimori(user_agent)?,
            base_url,
        ))
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.shikimori_base_url, &config.shikimori_user_agent)
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http_client,
            mapper: ShikimoriMapper::new(&base_url),
            base_url,
        }
    }

    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

#[async_trait]
impl AnimeCatalog for ShikimoriCatalog {
    async fn search(&self, criteria: &SearchCriteria) -> AppResult<Vec<AnimeSummary>> {
        criteria.validate()?;

        log::info!(
            "Shikimori: searching {:?} (page {}, limit {})",
            criteria.search,
            criteria.page,
            criteria.limit
        );

        let items: Vec<AnimeShort> = self
            .http_client
            .get(&self.url("animes"), &criteria.to_query_pairs())
            .await?;

        Ok(items
            .into_iter()
            .map(|item| self.mapper.map_summary(item))
            .collect())
    }

    async fn get_anime(&self, id: i64) -> AppResult<Option<AnimeDetails>> {
        let item: Option<AnimeFull> = self
            .http_client
            .get_optional(&self.url(&format!("animes/{}", id)), NO_QUERY)
            .await?;

        if item.is_none() {
            log::info!("Shikimori: no anime with id {}", id);
        }
        Ok(item.map(|dto| self.mapper.map_details(dto)))
    }

    async fn get_related(&self, id: i64) -> AppResult<Vec<RelatedAnime>> {
        let items: Option<Vec<RelatedDto>> = self
            .http_client
            .get_optional(&self.url(&format!("animes/{}/related", id)), NO_QUERY)
            .await?;

        Ok(items
            .map(|items| self.mapper.map_related(items))
            .unwrap_or_default())
    }
}
