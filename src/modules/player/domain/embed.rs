use crate::shared::errors::{AppError, AppResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER_HOST: &str = "kodik.info";

/// What to open in the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRequest {
    /// Shikimori anime id
    pub anime_id: i64,
    pub episode: Option<u32>,
    pub translation_id: Option<i64>,
}

impl EmbedRequest {
    pub fn new(anime_id: i64) -> Self {
        Self {
            anime_id,
            episode: None,
            translation_id: None,
        }
    }

    pub fn episode(mut self, episode: u32) -> Self {
        self.episode = Some(episode);
        self
    }

    pub fn translation(mut self, translation_id: i64) -> Self {
        self.translation_id = Some(translation_id);
        self
    }

    /// `https://{host}/find-player?shikimoriID=..[&episode=..][&only_translations=..]`
    pub fn url(&self, host: &str) -> AppResult<String> {
        if self.anime_id <= 0 {
            return Err(AppError::ValidationError(
                "Anime id must be positive".to_string(),
            ));
        }
        if self.episode == Some(0) {
            return Err(AppError::ValidationError(
                "Episode numbering starts at 1".to_string(),
            ));
        }

        let mut url = Url::parse(&format!("https://{}/find-player", host))
            .map_err(|e| AppError::InvalidInput(format!("Invalid player host {}: {}", host, e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("shikimoriID", &self.anime_id.to_string());
            if let Some(episode) = self.episode {
                query.append_pair("episode", &episode.to_string());
            }
            if let Some(translation) = self.translation_id {
                query.append_pair("only_translations", &translation.to_string());
            }
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query_from_optional_parts() {
        assert_eq!(
            EmbedRequest::new(5114).url(DEFAULT_PLAYER_HOST).unwrap(),
            "https://kodik.info/find-player?shikimoriID=5114"
        );
        assert_eq!(
            EmbedRequest::new(5114)
                .episode(3)
                .translation(610)
                .url(DEFAULT_PLAYER_HOST)
                .unwrap(),
            "https://kodik.info/find-player?shikimoriID=5114&episode=3&only_translations=610"
        );
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(EmbedRequest::new(0).url(DEFAULT_PLAYER_HOST).is_err());
        assert!(EmbedRequest::new(1).episode(0).url(DEFAULT_PLAYER_HOST).is_err());
    }
}
