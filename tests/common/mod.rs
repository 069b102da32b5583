//! Local stand-ins for the Spotify and Gemini APIs.
//!
//! Each fake is an axum router served on an ephemeral port, so the real
//! clients can be pointed at it through their base URLs.

#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tunescout::{
    gemini::GeminiClient,
    spotify::{SpotifyClient, SpotifyCredentials},
};

pub const GEMINI_KEY: &str = "test-key";
pub const GEMINI_MODEL: &str = "test-model";

/// Serves `router` on 127.0.0.1 and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn spotify_client() -> SpotifyClient {
    let base = spawn(fake_spotify()).await;
    SpotifyClient::new(
        base.clone(),
        format!("{}/token", base),
        Some(SpotifyCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        }),
        Duration::from_secs(5),
    )
}

pub async fn gemini_client(model: &str) -> GeminiClient {
    let base = spawn(fake_gemini()).await;
    GeminiClient::new(
        base,
        Some(GEMINI_KEY.to_string()),
        model,
        Duration::from_secs(5),
    )
}

fn track(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Song {}", id),
        "artists": [{ "name": "Artist" }],
        "preview_url": null,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "album": { "name": "Album", "images": [{ "url": "https://i.scdn.co/a" }] }
    })
}

fn page(ids: impl Iterator<Item = String>) -> Value {
    let items: Vec<Value> = ids.map(|id| json!({ "track": track(&id) })).collect();
    json!({ "items": items, "next": null })
}

/// Playlists served by the fake:
///
/// - `full`: a page of 100 items (one `track: null`, one repeated id) then a
///   short page of 3
/// - `broken`: a full page, then a 500 on the next one
/// - `missing`: 404 on the first page
async fn playlist_tracks(
    Path(playlist_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let offset: usize = query
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);

    match (playlist_id.as_str(), offset) {
        ("full", 0) => {
            let mut body = page((0..100).map(|i| format!("t{}", i)));
            body["items"][5] = json!({ "track": null });
            body["items"][7] = json!({ "track": track("t0") });
            Json(body).into_response()
        }
        ("full", 100) => Json(page((100..103).map(|i| format!("t{}", i)))).into_response(),
        ("broken", 0) => Json(page((0..100).map(|i| format!("b{}", i)))).into_response(),
        ("broken", _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn audio_features(Path(track_id): Path<String>) -> Response {
    if track_id == "t1" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({ "valence": 0.9, "energy": 0.8, "tempo": 128.6 })).into_response()
}

async fn search(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let items: Vec<Value> = match query.get("q").map(String::as_str) {
        Some("nothing") => Vec::new(),
        _ => vec![track("s1"), track("s2")],
    };
    Json(json!({ "tracks": { "items": items } }))
}

async fn single_track(Path(track_id): Path<String>) -> Response {
    match track_id.as_str() {
        "with_preview" => {
            let mut body = track("with_preview");
            body["preview_url"] = json!("https://p.scdn.co/mp3-preview/1");
            Json(body).into_response()
        }
        "no_preview" => Json(track("no_preview")).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn fake_spotify() -> Router {
    Router::new()
        .route(
            "/token",
            post(|| async {
                Json(json!({
                    "access_token": "fake-token",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }))
            }),
        )
        .route("/playlists/{playlist_id}/tracks", get(playlist_tracks))
        .route("/audio-features/{track_id}", get(audio_features))
        .route("/search", get(search))
        .route("/tracks/{track_id}", get(single_track))
}

/// Answers `generateContent` calls. The model named `empty-model` returns no
/// candidates, `prose-model` returns text without an array, and every other
/// model returns two recommendations split over two parts.
async fn generate_content(
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("key").map(String::as_str) != Some(GEMINI_KEY) {
        return (StatusCode::FORBIDDEN, "API key not valid").into_response();
    }

    let model = call.trim_end_matches(":generateContent");
    let body = match model {
        "empty-model" => json!({ "candidates": [] }),
        "prose-model" => json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot help with that." }] } }]
        }),
        _ => json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "Sure! [{\"title\": \"Low\", \"artist\": \"Nova\", \"matchScore\": 0.6}, " },
                    { "text": "{\"title\": \"High\", \"artist\": \"Vega\", \"mood\": \"chill\", \"matchScore\": 0.95}]" }
                ] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }),
    };
    Json(body).into_response()
}

pub fn fake_gemini() -> Router {
    Router::new().route("/models/{call}", post(generate_content))
}
