//! Voice-over popularity tests

mod utils;

use shikaraka_lib::AppError;
use utils::build_test_services;
use uuid::Uuid;

#[tokio::test]
async fn test_percentages_follow_latest_selection_per_user() {
    let services = build_test_services();
    let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    services.voice_stats.record_selection(7, &a, "AniLibria").await.unwrap();
    services.voice_stats.record_selection(7, &b, "AniLibria").await.unwrap();
    services.voice_stats.record_selection(7, &c, "Studio Band").await.unwrap();
    services.voice_stats.record_selection(7, &d, "Crunchyroll").await.unwrap();

    let stats = services.voice_stats.get_voice_stats(7).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.stats[0].voice, "AniLibria");
    assert_eq!(stats.stats[0].count, 2);
    assert!((stats.stats[0].percentage - 50.0).abs() < 1e-9);

    // switching voice moves the vote, it does not add one
    services.voice_stats.record_selection(7, &d, "AniLibria").await.unwrap();
    let stats = services.voice_stats.get_voice_stats(7).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.stats[0].count, 3);
    assert_eq!(stats.stats.len(), 2);
}

#[tokio::test]
async fn test_empty_anime_has_no_stats() {
    let services = build_test_services();
    let stats = services.voice_stats.get_voice_stats(99).await.unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.stats.is_empty());
}

#[tokio::test]
async fn test_blank_voice_label_rejected() {
    let services = build_test_services();
    let err = services
        .voice_stats
        .record_selection(7, &Uuid::new_v4(), "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
