#![allow(clippy::unwrap_used, clippy::expect_used)]
// End-to-end tests: route binder over the HTTP-backed catalog sources.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use encore_core::{Catalog, CatalogConfig, CoreError, PageQuery, ParamMap, Router, SortOrder};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Catalog) {
    let server = MockServer::start().await;
    let mut config = CatalogConfig::new(Url::parse(&server.uri()).unwrap());
    config.api_prefix = "api".into();
    let catalog = Catalog::new(config).unwrap();
    (server, catalog)
}

async fn mount_artist(server: &MockServer, id: &str, name: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/api/artists/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "_id": id, "name": name }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn artist(id: &str) -> ParamMap {
    ParamMap::new().with("artistId", id)
}

// ── Facade ──────────────────────────────────────────────────────────

#[tokio::test]
async fn artist_url_matches_request_path() {
    let (server, catalog) = setup().await;
    assert_eq!(
        catalog.artist_url("42"),
        format!("{}/api/artists/42", server.uri())
    );
}

#[tokio::test]
async fn album_tracks_are_sorted() {
    let (server, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums/al1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "t2", "name": "Two", "position": 2 },
            { "id": "t1", "name": "One", "position": 1 }
        ])))
        .mount(&server)
        .await;

    let tracks = catalog.album_tracks("al1").await.unwrap();
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Two"]);
}

#[tokio::test]
async fn albums_page_converts_to_domain() {
    let (server, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": { "page": 1, "per_page": 1, "items": 2 },
            "results": [{ "_id": "al1", "name": "One", "released_date": "1959-08-17" }]
        })))
        .mount(&server)
        .await;

    let query = PageQuery {
        order: Some(SortOrder::Asc),
        ..PageQuery::default()
    };
    let page = catalog.albums(&query).await.unwrap();

    assert_eq!(page.total, 2);
    assert!(page.has_next());
    assert_eq!(
        page.items[0].released.map(|d| d.to_string()).as_deref(),
        Some("1959-08-17")
    );
}

#[tokio::test]
async fn missing_album_maps_to_not_found() {
    let (server, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums/slug/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = catalog.album_by_slug("nope").await.unwrap_err();
    assert!(
        matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "nope"),
        "unexpected error: {err:?}"
    );
}

// ── Binding ─────────────────────────────────────────────────────────

#[tokio::test]
async fn bound_artist_follows_navigation() {
    let (server, catalog) = setup().await;
    mount_artist(&server, "42", "X", Duration::ZERO).await;

    let router = Router::new(artist("42"));
    let handle = catalog.bind_artist(router.param_map());
    let mut view = handle.subscribe();

    let state = tokio::time::timeout(
        Duration::from_secs(5),
        view.wait_for(|s| !s.loading && s.generation == 1),
    )
    .await
    .expect("timed out")
    .expect("binder gone");

    assert_eq!(
        state.source_url.as_deref(),
        Some(format!("{}/api/artists/42", server.uri()).as_str())
    );
    let entity = state.entity.expect("artist loaded");
    assert_eq!(entity.id.as_str(), "42");
    assert_eq!(entity.name, "X");

    handle.stop().await;
}

#[tokio::test]
async fn slow_superseded_response_is_discarded() {
    let (server, catalog) = setup().await;
    mount_artist(&server, "slow", "Slow", Duration::from_millis(300)).await;
    mount_artist(&server, "fast", "Fast", Duration::ZERO).await;

    let router = Router::new(artist("slow"));
    let handle = catalog.bind_artist(router.param_map());
    let mut view = handle.subscribe();

    view.wait_for(|s| s.generation == 1).await.unwrap();
    router.navigate(artist("fast"));

    let state = tokio::time::timeout(
        Duration::from_secs(5),
        view.wait_for(|s| s.entity.is_some()),
    )
    .await
    .expect("timed out")
    .expect("binder gone");
    assert_eq!(state.entity.as_ref().unwrap().name, "Fast");

    tokio::time::sleep(Duration::from_millis(500)).await;
    let state = handle.snapshot();
    assert_eq!(state.entity.as_ref().unwrap().name, "Fast");
    assert_eq!(state.generation, 2);

    handle.stop().await;
}

#[tokio::test]
async fn server_error_is_visible_in_view_state() {
    let (server, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/artists/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let router = Router::new(artist("broken"));
    let handle = catalog.bind_artist(router.param_map());
    let mut view = handle.subscribe();

    let state = tokio::time::timeout(
        Duration::from_secs(5),
        view.wait_for(|s| s.error.is_some()),
    )
    .await
    .expect("timed out")
    .expect("binder gone");

    assert!(state.entity.is_none());
    assert!(!state.loading);
    let err = state.error.unwrap();
    assert!(matches!(*err, CoreError::Api { status: Some(503), .. }));
    assert!(err.is_transient());

    handle.stop().await;
}

#[tokio::test]
async fn bound_album_reads_album_id() {
    let (server, catalog) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums/al7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "al7",
            "name": "Seven",
            "artists": [{ "_id": "a1", "name": "One" }, { "_id": "a2", "name": "Two" }]
        })))
        .mount(&server)
        .await;

    let router = Router::new(ParamMap::new().with("albumId", "al7"));
    let handle = catalog.bind_album(router.param_map());
    let mut view = handle.subscribe();

    let state = tokio::time::timeout(
        Duration::from_secs(5),
        view.wait_for(|s| s.entity.is_some()),
    )
    .await
    .expect("timed out")
    .expect("binder gone");

    let album = state.entity.unwrap();
    assert_eq!(album.name, "Seven");
    assert_eq!(album.artist_names(), "One, Two");
    assert_eq!(state.source_url, Some(catalog.album_url("al7")));

    handle.stop().await;
}
