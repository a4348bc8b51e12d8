//! Favorites and watch status tests

mod utils;

use shikaraka_lib::modules::favorites::{NewFavorite, WatchStatus};
use shikaraka_lib::AppError;
use utils::build_test_services;
use uuid::Uuid;

#[tokio::test]
async fn test_add_list_and_filter_by_status() {
    let services = build_test_services();
    let user = Uuid::new_v4();

    services
        .favorites
        .add_favorite(&user, NewFavorite::new(1)
                .with_title("Mushishi")
                .with_image("/system/animes/original/457.jpg"))
        .await
        .unwrap();
    services
        .favorites
        .add_favorite(&user, NewFavorite::new(2).with_status(WatchStatus::Watching))
        .await
        .unwrap();

    let all = services.favorites.list_favorites(&user, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].anime_id, 2);

    let planned = services
        .favorites
        .list_favorites(&user, Some(WatchStatus::Planned))
        .await
        .unwrap();
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].anime_title.as_deref(), Some("Mushishi"));
    assert!(planned[0].anime_image.is_some());
}

#[tokio::test]
async fn test_adding_twice_keeps_one_entry() {
    let services = build_test_services();
    let user = Uuid::new_v4();

    services.favorites.add_favorite(&user, NewFavorite::new(5)).await.unwrap();
    services
        .favorites
        .add_favorite(&user, NewFavorite::new(5).with_status(WatchStatus::Completed))
        .await
        .unwrap();

    let all = services.favorites.list_favorites(&user, None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, WatchStatus::Completed);
}

#[tokio::test]
async fn test_status_update_and_removal() {
    let services = build_test_services();
    let user = Uuid::new_v4();

    services.favorites.add_favorite(&user, NewFavorite::new(8)).await.unwrap();
    // warm the cache so the optimistic patch has something to touch
    assert!(services.favorites.is_favorite(&user, 8).await.unwrap());

    let updated = services
        .favorites
        .update_watch_status(&user, 8, WatchStatus::Dropped)
        .await
        .unwrap();
    assert_eq!(updated.status, WatchStatus::Dropped);

    assert!(services.favorites.remove_favorite(&user, 8).await.unwrap());
    assert!(!services.favorites.is_favorite(&user, 8).await.unwrap());
    assert!(!services.favorites.remove_favorite(&user, 8).await.unwrap());
}

#[tokio::test]
async fn test_status_update_of_missing_favorite_rolls_back() {
    let services = build_test_services();
    let user = Uuid::new_v4();

    services.favorites.add_favorite(&user, NewFavorite::new(1)).await.unwrap();
    let before = services.favorites.list_favorites(&user, None).await.unwrap();

    let err = services
        .favorites
        .update_watch_status(&user, 404, WatchStatus::OnHold)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let after = services.favorites.list_favorites(&user, None).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_lists_are_private_per_user() {
    let services = build_test_services();
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    services.favorites.add_favorite(&alice, NewFavorite::new(1)).await.unwrap();
    assert!(services.favorites.list_favorites(&bob, None).await.unwrap().is_empty());
}
