use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use venuego::core::{ConfigProvider, VenueSource};
use venuego::{
    HttpVenueSource, JsonFileStore, SortOrder, TomlConfig, VenueError, VenueService,
};

fn venue_payload() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "name": "Arena A", "address": "North Street", "kilometres": 5.0,
         "rating": 4.2, "sports": ["Football"], "featured": 1},
        {"id": 2, "name": "Arena B", "address": "South Street", "kilometres": 2.0,
         "rating": 3.9, "sports": ["Cricket"], "price": {"Cricket": 800.0}},
        {"id": 3, "name": "Arena C", "address": "East Street", "kilometres": 2.0,
         "rating": 4.8, "sports": ["Tennis"], "logo": "https://cdn.example.com/c.png"}
    ])
}

fn config_for(endpoint: &str, storage_path: &str) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[source]
endpoint = "{}"
timeout_seconds = 5

[storage]
path = "{}"

[browse]
debounce_ms = 50
"#,
        endpoint,
        storage_path.replace('\\', "/")
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

fn service_for(
    server: &MockServer,
    path: &str,
    temp_dir: &TempDir,
) -> Result<VenueService<HttpVenueSource, JsonFileStore, TomlConfig>> {
    let storage_path = temp_dir.path().to_str().unwrap().to_string();
    let config = config_for(&server.url(path), &storage_path)?;
    let source = HttpVenueSource::new(config.api_endpoint(), config.request_timeout())?;
    let store = JsonFileStore::new(config.storage_path());
    Ok(VenueService::new(source, store, config))
}

#[tokio::test]
async fn test_list_filters_then_sorts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/venues");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(venue_payload());
    });

    let service = service_for(&server, "/venues", &temp_dir)?;
    let catalog = service.fetch_catalog().await;
    assert!(catalog.fetched_at <= chrono::Utc::now());

    let ascending: Vec<i64> = service
        .list(&catalog, "arena", SortOrder::Ascending)
        .await
        .iter()
        .map(|l| l.venue.id)
        .collect();
    assert_eq!(ascending, vec![2, 3, 1]);

    let descending: Vec<i64> = service
        .list(&catalog, "", SortOrder::Descending)
        .await
        .iter()
        .map(|l| l.venue.id)
        .collect();
    assert_eq!(descending, vec![1, 2, 3]);

    let cricket = service.list(&catalog, "CRICKET", SortOrder::None).await;
    assert_eq!(cricket.len(), 1);
    assert_eq!(cricket[0].venue.id, 2);
    assert!(!cricket[0].is_favourite);

    // every listing reuses the one fetched catalog
    api_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_favourites_persist_across_services() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/venues");
        then.status(200).json_body(venue_payload());
    });

    let service = service_for(&server, "/venues", &temp_dir)?;
    let favourites = service.favourites();
    favourites.toggle_and_save(3).await?;
    favourites.toggle_and_save(1).await?;

    let stored = std::fs::read_to_string(temp_dir.path().join("favorites.json"))?;
    assert_eq!(stored, "[3,1]");

    // a fresh service over the same directory sees the same favourites
    let reopened = service_for(&server, "/venues", &temp_dir)?;
    let catalog = reopened.fetch_catalog().await;
    let listed: Vec<(i64, bool)> = reopened
        .list(&catalog, "", SortOrder::None)
        .await
        .iter()
        .map(|l| (l.venue.id, l.is_favourite))
        .collect();
    assert_eq!(listed, vec![(1, true), (2, false), (3, true)]);

    let saved: Vec<i64> = reopened
        .favourite_listings(&catalog)
        .await
        .iter()
        .map(|l| l.venue.id)
        .collect();
    assert_eq!(saved, vec![1, 3]);
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_degrades_to_empty_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(500);
    });

    let service = service_for(&server, "/failed", &temp_dir)?;
    let catalog = service.fetch_catalog().await;
    assert!(catalog.is_empty());
    assert!(service
        .list(&catalog, "arena", SortOrder::Ascending)
        .await
        .is_empty());

    api_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_http_source_reports_status_and_skips_invalid_venues() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/unavailable");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/mixed");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "name": "Good", "kilometres": 1.0},
            {"id": 2, "name": "Behind you", "kilometres": -3.0},
            {"id": 3, "name": "", "kilometres": 2.0},
            {"id": 4, "name": "Also good", "distanceKm": 0.0, "sports": ["Badminton"]}
        ]));
    });

    let unavailable = HttpVenueSource::new(server.url("/unavailable"), Duration::from_secs(5))?;
    match unavailable.fetch_venues().await {
        Err(VenueError::UpstreamStatus { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected upstream status error, got {:?}", other),
    }

    let mixed = HttpVenueSource::new(server.url("/mixed"), Duration::from_secs(5))?;
    let ids: Vec<i64> = mixed.fetch_venues().await?.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 4]);
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_an_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/object");
        then.status(200).json_body(serde_json::json!({"venues": []}));
    });

    let source = HttpVenueSource::new(server.url("/object"), Duration::from_secs(5))?;
    let err = source.fetch_venues().await.unwrap_err();
    assert!(matches!(err, VenueError::ApiError(_)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_browser_from_service_uses_configured_debounce() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/venues");
        then.status(200).json_body(venue_payload());
    });

    let service = service_for(&server, "/venues", &temp_dir)?;
    let catalog = service.fetch_catalog().await;
    let browser = service.browser(&catalog);
    assert_eq!(browser.delay(), Duration::from_millis(50));

    browser.search("tennis").await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = browser.snapshot().await;
    assert!(!snapshot.searching);
    let ids: Vec<i64> = snapshot.venues.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![3]);
    Ok(())
}
