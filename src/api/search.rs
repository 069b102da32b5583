use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{api::ApiError, server::AppState, spotify::tracks::SEARCH_LIMIT};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /api/search?q=` - searches Spotify for tracks.
pub async fn search(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let query = params
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let token = state.access_token().await?;
    let results = state
        .spotify
        .search_tracks(&token, &query, SEARCH_LIMIT)
        .await?;

    Ok(Json(json!({
        "success": true,
        "results": results,
        "count": results.len(),
    })))
}

/// `GET /api/preview/{track_id}` - preview URL of a single track.
pub async fn preview(
    Extension(state): Extension<AppState>,
    Path(track_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let token = state.access_token().await?;
    let preview_url = state
        .spotify
        .get_track_preview(&token, &track_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Preview not available for this track".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "previewUrl": preview_url,
    })))
}
