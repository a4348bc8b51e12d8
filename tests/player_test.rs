//! Embedded player message gate tests

use shikaraka_lib::modules::player::{EmbedRequest, OriginPolicy, PlayerEvent, PlayerService};
use shikaraka_lib::AppError;
use tokio_test::{assert_err, assert_ok};

fn service() -> PlayerService {
    PlayerService::new(OriginPolicy::new(["kodik.info", "aniqit.com"]))
}

#[test]
fn test_trusted_origin_events_are_parsed() {
    let player = service();

    let event = player
        .handle_message(
            "https://kodik.info",
            r#"{"key":"kodik_player_time_update","value":93.5}"#,
        )
        .unwrap();
    assert_eq!(event, Some(PlayerEvent::TimeUpdate { time: 93.5 }));

    let event = player
        .handle_message(
            "https://cdn.aniqit.com",
            r#"{"key":"kodik_player_current_episode","value":{"episode":4,"translation":{"title":"AniLibria"}}}"#,
        )
        .unwrap();
    assert_eq!(
        event,
        Some(PlayerEvent::EpisodeChange {
            episode: 4,
            translation: Some("AniLibria".to_string())
        })
    );
}

#[test]
fn test_untrusted_origins_are_rejected() {
    let player = service();
    let message = r#"{"key":"kodik_player_play"}"#;

    for origin in [
        "http://kodik.info",
        "https://evilkodik.info",
        "https://kodik.info.evil.com",
        "null",
        "",
    ] {
        assert!(
            matches!(player.handle_message(origin, message), Err(AppError::Forbidden(_))),
            "{} should be rejected",
            origin
        );
    }
}

#[test]
fn test_unknown_and_malformed_messages() {
    let player = service();
    assert_eq!(
        player
            .handle_message("https://kodik.info", r#"{"key":"kodik_player_volume_change","value":0.4}"#)
            .unwrap(),
        None
    );
    assert!(player.handle_message("https://kodik.info", "not json").is_err());
}

#[test]
fn test_embed_url() {
    let player = service();
    let url = assert_ok!(player.embed_url(&EmbedRequest::new(52991).episode(3).translation(610)));
    assert_eq!(
        url,
        "https://kodik.info/find-player?shikimoriID=52991&episode=3&only_translations=610"
    );
    assert_err!(player.embed_url(&EmbedRequest::new(1).episode(0)));
    assert_err!(player.embed_url(&EmbedRequest::new(-5)));

    let mirrored = service().with_player_host("aniqit.com");
    assert_eq!(
        assert_ok!(mirrored.embed_url(&EmbedRequest::new(7))),
        "https://aniqit.com/find-player?shikimoriID=7"
    );
}
