//! Catalog caching, request sharing and retry tests

mod utils;

use shikaraka_lib::modules::catalog::{
    CatalogService, SearchCriteria, SearchOrder, ShikimoriCatalog,
};
use shikaraka_lib::shared::http::RetryPolicy;
use shikaraka_lib::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use utils::{AnimeFactory, FakeCatalog};

fn service(catalog: &Arc<FakeCatalog>) -> CatalogService {
    CatalogService::new(catalog.clone())
        .with_read_policy(RetryPolicy::reads().with_base_delay(Duration::from_millis(1)))
}

#[tokio::test]
async fn test_repeated_search_is_served_from_cache() {
    let catalog = Arc::new(FakeCatalog::with_results(vec![
        AnimeFactory::new().id(1).name("Frieren").build(),
        AnimeFactory::new().id(2).name("Mushishi").build(),
    ]));
    let service = service(&catalog);
    let criteria = SearchCriteria::query("a");

    let first = service.search_anime(&criteria).await.unwrap();
    let second = service.search_anime(&criteria).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(catalog.searches(), 1);
    let stats = service.cache_stats();
    assert_eq!(stats.hits, 1);
    assert!((stats.hit_rate() - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_concurrent_searches_share_one_request() {
    let catalog = Arc::new(
        FakeCatalog::with_results(vec![AnimeFactory::new().id(3).build()])
            .with_delay(Duration::from_millis(50)),
    );
    let service = Arc::new(service(&catalog));
    let criteria = SearchCriteria::query("shared");

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let service = Arc::clone(&service);
            let criteria = criteria.clone();
            tokio::spawn(async move { service.search_anime(&criteria).await })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        assert_eq!(result.unwrap().unwrap().len(), 1);
    }
    assert_eq!(catalog.searches(), 1);
    assert_eq!(service.cache_stats().deduplicated, 4);
}

#[tokio::test]
async fn test_different_criteria_use_different_entries() {
    let catalog = Arc::new(FakeCatalog::with_results(Vec::new()));
    let service = service(&catalog);

    service.search_anime(&SearchCriteria::query("a")).await.unwrap();
    service
        .search_anime(&SearchCriteria::query("a").with_page(2, 20))
        .await
        .unwrap();
    service
        .search_anime(&SearchCriteria::query("a").with_order(SearchOrder::Ranked))
        .await
        .unwrap();
    assert_eq!(catalog.searches(), 3);

    service.invalidate_all();
    service.search_anime(&SearchCriteria::query("a")).await.unwrap();
    assert_eq!(catalog.searches(), 4);
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let catalog = Arc::new(
        FakeCatalog::default()
            .with_details(AnimeFactory::new().id(52991).name("Sousou no Frieren").build_details())
            .failing_first(2),
    );
    let service = service(&catalog);

    let details = service.get_anime(52991).await.unwrap().expect("anime exists");
    assert_eq!(details.summary.name, "Sousou no Frieren");
    assert_eq!(catalog.detail_lookups(), 3);
}

#[tokio::test]
async fn test_failures_surface_without_retry_budget() {
    let catalog = Arc::new(FakeCatalog::default().failing_first(1));
    let service = CatalogService::new(catalog.clone()).with_read_policy(RetryPolicy::none());

    let err = service.get_anime(1).await.unwrap_err();
    assert!(matches!(err, AppError::ExternalServiceError(_)));
    assert_eq!(catalog.detail_lookups(), 1);

    // errors are not cached
    assert!(service.get_anime(1).await.unwrap().is_none());
    assert_eq!(catalog.detail_lookups(), 2);
}

#[tokio::test]
async fn test_invalid_criteria_never_reach_upstream() {
    let catalog = Arc::new(FakeCatalog::default());
    let service = service(&catalog);

    let bad_season = SearchCriteria::query("x").with_season("autumn_2024");
    assert!(matches!(
        service.search_anime(&bad_season).await,
        Err(AppError::ValidationError(_))
    ));
    let too_many = SearchCriteria::query("x").with_page(1, 51);
    assert!(service.search_anime(&too_many).await.is_err());
    assert!(service.get_anime(0).await.is_err());
    assert_eq!(catalog.searches(), 0);
}

/// Local upstream that answers every request with 503 and counts them
async fn unavailable_upstream() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 503 Service Unavailable\r\n\
                          Content-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), requests)
}

#[tokio::test]
async fn test_unavailable_upstream_is_retried_once_per_attempt() {
    let (base_url, requests) = unavailable_upstream().await;
    let catalog = Arc::new(ShikimoriCatalog::new(&base_url, "shikaraka-tests").unwrap());
    let service = CatalogService::new(catalog)
        .with_read_policy(RetryPolicy::catalog().with_base_delay(Duration::from_millis(1)));

    let err = service
        .search_anime(&SearchCriteria::query("Frieren"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ExternalServiceError(_)));
    // first try plus three retries, no retries underneath
    assert_eq!(requests.load(Ordering::SeqCst), 4);
}
