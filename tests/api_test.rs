mod common;

use std::{path::PathBuf, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use tunescout::{
    gemini::GeminiClient,
    management::LibraryStore,
    server::{AppState, router},
    spotify::SpotifyClient,
};

async fn connected_app(store_root: PathBuf) -> Router {
    let spotify = common::spotify_client().await;
    let gemini = common::gemini_client(common::GEMINI_MODEL).await;
    router(AppState::new(spotify, gemini, LibraryStore::new(store_root)))
}

// Port 9 (discard) is never contacted: every request below fails validation
// or configuration checks before any provider call.
fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let spotify = SpotifyClient::new(
        "http://127.0.0.1:9",
        "http://127.0.0.1:9/token",
        None,
        Duration::from_secs(1),
    );
    let gemini = GeminiClient::new("http://127.0.0.1:9", None, "test-model", Duration::from_secs(1));
    let store = LibraryStore::new(dir.path().join("store"));
    (dir, router(AppState::new(spotify, gemini, store)))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Backend is running");
}

#[tokio::test]
async fn test_unknown_route() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, Method::GET, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_import_requires_url() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, Method::POST, "/api/import", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Playlist URL is required");
}

#[tokio::test]
async fn test_import_apple_music_not_implemented() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        app,
        Method::POST,
        "/api/import",
        Some(json!({ "playlistUrl": "https://music.apple.com/us/playlist/pl.u-123" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(
        body["error"],
        "Apple Music integration coming soon. Please use Spotify for now."
    );
    assert_eq!(body["info"], "Requires Apple Developer Program enrollment");
}

#[tokio::test]
async fn test_import_unsupported_platform() {
    let (_dir, app) = test_app();
    let (status, _) = send(
        app,
        Method::POST,
        "/api/import",
        Some(json!({ "playlistUrl": "https://example.com/playlist/1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_without_credentials() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        app,
        Method::POST,
        "/api/import",
        Some(json!({ "playlistUrl": "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("credentials"));
}

#[tokio::test]
async fn test_recommend_requires_songs() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, Method::POST, "/api/recommend", Some(json!({ "songs": [] }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Songs array is required");
}

#[tokio::test]
async fn test_mood_recommend_requires_songs() {
    let (_dir, app) = test_app();
    let (status, _) = send(
        app,
        Method::POST,
        "/api/recommend/mood",
        Some(json!({ "mood": "chill" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_without_api_key() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        app,
        Method::POST,
        "/api/recommend",
        Some(json!({ "songs": [{ "title": "Song", "artist": "Artist", "tempo": "120" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_search_requires_query() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, Method::GET, "/api/search?q=%20", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        app,
        Method::POST,
        "/api/stats",
        Some(json!({
            "originalSongs": [{ "artist": "A" }, { "artist": "B" }],
            "recommendations": [
                { "artist": "B", "genre": "Rock", "mood": "Happy", "tempo": 100 },
                { "artist": "C", "genre": "Rock", "mood": "Chill", "tempo": "120" },
                { "artist": "D", "mood": "Chill" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let stats = &body["stats"];
    assert_eq!(stats["newArtistsCount"], 2);
    assert_eq!(stats["totalRecommendedArtists"], 3);
    assert_eq!(stats["newArtistsPercentage"], 66.7);
    assert_eq!(stats["genreBreakdown"]["Rock"], 2);
    assert_eq!(stats["genreBreakdown"]["Unknown"], 1);
    assert_eq!(stats["moodBreakdown"]["Chill"], 2);
    assert_eq!(stats["averageTempo"], 110);
    assert_eq!(stats["totalRecommendations"], 3);
}

#[tokio::test]
async fn test_library_lists_start_empty() {
    let (_dir, app) = test_app();

    for (uri, key) in [
        ("/api/songs", "songs"),
        ("/api/recommendations", "recommendations"),
        ("/api/playlist", "playlist"),
    ] {
        let (status, body) = send(app.clone(), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[key], json!([]));
        assert_eq!(body["count"], 0);
    }
}

#[tokio::test]
async fn test_put_playlist_rejects_unknown_ids() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        app.clone(),
        Method::PUT,
        "/api/playlist",
        Some(json!({ "songIds": ["rec_0"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("rec_0"));

    let (status, body) = send(app, Method::PUT, "/api/playlist", Some(json!({ "songIds": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_import_stores_songs() {
    let dir = TempDir::new().unwrap();
    let app = connected_app(dir.path().join("store")).await;

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/api/import",
        Some(json!({ "playlistUrl": "https://open.spotify.com/playlist/full" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["platform"], "spotify");
    assert_eq!(body["count"], 101);
    assert_eq!(body["songs"][0]["mood"], "Happy");

    let (status, body) = send(app, Method::GET, "/api/songs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 101);
    assert_eq!(body["songs"][0]["id"], "t0");
}

#[tokio::test]
async fn test_recommend_stores_and_builds_playlist() {
    let dir = TempDir::new().unwrap();
    let app = connected_app(dir.path().join("store")).await;

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/api/recommend",
        Some(json!({ "songs": [{ "title": "Song", "artist": "Artist" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["recommendations"][0]["title"], "High");
    let top_id = body["recommendations"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(app.clone(), Method::GET, "/api/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = send(
        app,
        Method::PUT,
        "/api/playlist",
        Some(json!({ "songIds": [top_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playlist"][0]["songId"], top_id);
}

#[tokio::test]
async fn test_mood_recommend_reports_mood() {
    let dir = TempDir::new().unwrap();
    let app = connected_app(dir.path().join("store")).await;

    let (status, body) = send(
        app,
        Method::POST,
        "/api/recommend/mood",
        Some(json!({ "songs": [{ "title": "Song", "artist": "Artist" }], "count": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], "all");
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_recommend_fails_when_store_is_unwritable() {
    let dir = TempDir::new().unwrap();
    // a regular file where the store directory should be
    let store_root = dir.path().join("store");
    std::fs::write(&store_root, "not a directory").unwrap();
    let app = connected_app(store_root).await;

    for uri in ["/api/recommend", "/api/recommend/mood"] {
        let (status, body) = send(
            app.clone(),
            Method::POST,
            uri,
            Some(json!({ "songs": [{ "title": "Song", "artist": "Artist" }] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("success").is_none());
        assert!(body["error"].as_str().unwrap().contains("store"));
    }
}

#[tokio::test]
async fn test_search_and_preview() {
    let dir = TempDir::new().unwrap();
    let app = connected_app(dir.path().join("store")).await;

    let (status, body) = send(app.clone(), Method::GET, "/api/search?q=song", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = send(app.clone(), Method::GET, "/api/preview/with_preview", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previewUrl"], "https://p.scdn.co/mp3-preview/1");

    let (status, body) = send(app, Method::GET, "/api/preview/no_preview", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Preview not available for this track");
}
