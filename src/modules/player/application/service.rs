use crate::log_warn;
use crate::modules::player::domain::{
    parse_player_message, EmbedRequest, OriginPolicy, PlayerEvent, DEFAULT_PLAYER_HOST,
};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};

/// Gatekeeper between the embedded player and the app
#[derive(Debug, Clone)]
pub struct PlayerService {
    policy: OriginPolicy,
    player_host: String,
}

impl PlayerService {
    pub fn new(policy: OriginPolicy) -> Self {
        Self {
            policy,
            player_host: DEFAULT_PLAYER_HOST.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(OriginPolicy::new(&config.player_allowed_origins))
    }

    pub fn with_player_host(mut self, host: impl Into<String>) -> Self {
        self.player_host = host.into();
        self
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    /// Checks the sender before looking at the payload; messages from
    /// other origins are rejected unparsed
    pub fn handle_message(&self, origin: &str, data: &str) -> AppResult<Option<PlayerEvent>> {
        if !self.policy.is_allowed(origin) {
            log_warn!("Dropped player message from untrusted origin {:?}", origin);
            return Err(AppError::Forbidden(format!(
                "Untrusted player origin: {}",
                origin
            )));
        }
        parse_player_message(data)
    }

    pub fn embed_url(&self, request: &EmbedRequest) -> AppResult<String> {
        request.url(&self.player_host)
    }
}
