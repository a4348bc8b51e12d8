//! Messages posted by the embedded Kodik player.
//!
//! Raw messages look like `{"key": "kodik_player_time_update", "value": 93}`.

use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    Ready,
    Play,
    Pause,
    TimeUpdate {
        /// Playback position in seconds
        time: f64,
    },
    EpisodeChange {
        episode: u32,
        translation: Option<String>,
    },
    Ended,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    key: String,
    #[serde(default)]
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawTranslation {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEpisode {
    episode: u32,
    #[serde(default)]
    translation: Option<RawTranslation>,
}

/// Parses one message body. `Ok(None)` for well-formed messages this crate
/// does not track (volume, quality, ...).
pub fn parse_player_message(data: &str) -> AppResult<Option<PlayerEvent>> {
    let raw: RawMessage = serde_json::from_str(data)
        .map_err(|e| AppError::SerializationError(format!("Invalid player message: {}", e)))?;

    let event = match raw.key.as_str() {
        "kodik_player_api_initialized" | "kodik_player_ready" => PlayerEvent::Ready,
        "kodik_player_play" => PlayerEvent::Play,
        "kodik_player_pause" => PlayerEvent::Pause,
        "kodik_player_video_ended" => PlayerEvent::Ended,
        "kodik_player_time_update" => {
            let time = raw.value.as_f64().filter(|t| t.is_finite() && *t >= 0.0).ok_or_else(|| {
                AppError::ValidationError("time_update requires a non-negative time".to_string())
            })?;
            PlayerEvent::TimeUpdate { time }
        }
        "kodik_player_current_episode" => {
            let episode: RawEpisode = serde_json::from_value(raw.value).map_err(|e| {
                AppError::SerializationError(format!("Invalid episode payload: {}", e))
            })?;
            PlayerEvent::EpisodeChange {
                episode: episode.episode,
                translation: episode.translation.and_then(|t| t.title),
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracked_events() {
        assert_eq!(
            parse_player_message(r#"{"key":"kodik_player_play"}"#).unwrap(),
            Some(PlayerEvent::Play)
        );
        assert_eq!(
            parse_player_message(r#"{"key":"kodik_player_time_update","value":93.5}"#).unwrap(),
            Some(PlayerEvent::TimeUpdate { time: 93.5 })
        );
        assert_eq!(
            parse_player_message(
                r#"{"key":"kodik_player_current_episode","value":{"episode":3,"season":1,"translation":{"id":610,"title":"AniLibria.TV"}}}"#
            )
            .unwrap(),
            Some(PlayerEvent::EpisodeChange {
                episode: 3,
                translation: Some("AniLibria.TV".to_string())
            })
        );
    }

    #[test]
    fn ignores_untracked_and_rejects_malformed() {
        assert_eq!(
            parse_player_message(r#"{"key":"kodik_player_volume_change","value":0.4}"#).unwrap(),
            None
        );
        assert!(parse_player_message("not json").is_err());
        assert!(parse_player_message(r#"{"key":"kodik_player_time_update","value":-1}"#).is_err());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(PlayerEvent::TimeUpdate { time: 1.0 }).unwrap();
        assert_eq!(json["type"], "time_update");
        assert_eq!(json["time"], 1.0);
    }
}
