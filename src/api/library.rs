use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{api::ApiError, server::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRequest {
    #[serde(default)]
    pub song_ids: Vec<String>,
}

/// `GET /api/songs` - songs stored by the last import.
pub async fn list_songs(Extension(state): Extension<AppState>) -> Result<Json<Value>, ApiError> {
    let songs = state.store.lock().await.imported_songs().await?;
    Ok(Json(json!({
        "success": true,
        "songs": songs,
        "count": songs.len(),
    })))
}

/// `GET /api/recommendations` - recommendations stored by the last request.
pub async fn list_recommendations(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let recommendations = state.store.lock().await.recommendations().await?;
    Ok(Json(json!({
        "success": true,
        "recommendations": recommendations,
        "count": recommendations.len(),
    })))
}

/// `GET /api/playlist` - the built playlist.
pub async fn get_playlist(Extension(state): Extension<AppState>) -> Result<Json<Value>, ApiError> {
    let entries = state.store.lock().await.playlist().await?;
    Ok(Json(json!({
        "success": true,
        "playlist": entries,
        "count": entries.len(),
    })))
}

/// `PUT /api/playlist` - replaces the built playlist with stored recommendations.
pub async fn put_playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<Value>, ApiError> {
    let entries = state
        .store
        .lock()
        .await
        .replace_playlist(&request.song_ids)
        .await?;
    Ok(Json(json!({
        "success": true,
        "playlist": entries,
        "count": entries.len(),
    })))
}
