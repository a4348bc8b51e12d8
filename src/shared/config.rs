use std::env;

use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_SHIKIMORI_BASE_URL: &str = "https://shikimori.one";
pub const DEFAULT_USER_AGENT: &str = "ShiKaraKa/1.0";

/// Hosts the embedded player may post messages from
pub const DEFAULT_PLAYER_ORIGINS: &[&str] = &["kodik.info", "kodik.biz", "kodik.cc", "aniqit.com"];

/// Runtime configuration, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub database_url: Option<String>,
    pub shikimori_base_url: String,
    pub shikimori_user_agent: String,
    pub player_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `VITE_` prefixed names are
    /// accepted for the Supabase settings so the web app's `.env` works as is.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |names: &[&str]| {
            names
                .iter()
                .find_map(|n| lookup(n).filter(|v| !v.trim().is_empty()))
        };

        let supabase_url = pick(&["SUPABASE_URL", "VITE_SUPABASE_URL"]).ok_or_else(|| {
            AppError::InvalidInput("SUPABASE_URL environment variable not found".to_string())
        })?;
        if !supabase_url.starts_with("https://") && !supabase_url.starts_with("http://") {
            return Err(AppError::InvalidInput(
                "SUPABASE_URL must be an http(s) URL".to_string(),
            ));
        }

        let supabase_anon_key =
            pick(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]).ok_or_else(|| {
                AppError::InvalidInput(
                    "SUPABASE_ANON_KEY environment variable not found".to_string(),
                )
            })?;

        let player_allowed_origins = match pick(&["PLAYER_ALLOWED_ORIGINS"]) {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_PLAYER_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            database_url: pick(&["DATABASE_URL"]),
            shikimori_base_url: pick(&["SHIKIMORI_BASE_URL"])
                .unwrap_or_else(|| DEFAULT_SHIKIMORI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            shikimori_user_agent: pick(&["SHIKIMORI_USER_AGENT"])
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            player_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn accepts_vite_prefixed_names() {
        let config = AppConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://abc.supabase.co/"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.shikimori_base_url, DEFAULT_SHIKIMORI_BASE_URL);
        assert_eq!(config.player_allowed_origins.len(), DEFAULT_PLAYER_ORIGINS.len());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://abc.supabase.co")]))
            .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn origins_override() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("PLAYER_ALLOWED_ORIGINS", "Player.example, ,cdn.example"),
        ]))
        .unwrap();
        assert_eq!(
            config.player_allowed_origins,
            vec!["player.example".to_string(), "cdn.example".to_string()]
        );
    }
}
