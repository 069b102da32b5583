use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    info,
    server::AppState,
    utils::{self, Platform},
    warning,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub playlist_url: Option<String>,
}

/// `POST /api/import` - imports a playlist and stores its songs.
pub async fn import_playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<Value>, ApiError> {
    let playlist_url = request
        .playlist_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Playlist URL is required".to_string()))?;

    match utils::detect_platform(&playlist_url) {
        Platform::Spotify => {}
        Platform::AppleMusic => {
            return Err(ApiError::NotImplemented {
                error: "Apple Music integration coming soon. Please use Spotify for now."
                    .to_string(),
                info: "Requires Apple Developer Program enrollment".to_string(),
            });
        }
        Platform::Unsupported => {
            return Err(ApiError::BadRequest(
                "Unsupported playlist URL. Use Spotify or Apple Music.".to_string(),
            ));
        }
    }

    let token = state.access_token().await?;
    let songs = state
        .spotify
        .get_playlist_tracks(&token, &playlist_url)
        .await?;

    if songs.is_empty() {
        return Err(ApiError::BadRequest(
            "Failed to fetch playlist or playlist is empty".to_string(),
        ));
    }

    if let Err(e) = state.store.lock().await.replace_imported_songs(&songs).await {
        warning!("Failed to store imported songs: {}", e);
        return Err(e.into());
    }
    info!("Imported {} songs from {}", songs.len(), playlist_url);

    Ok(Json(json!({
        "success": true,
        "platform": Platform::Spotify.as_str(),
        "songs": songs,
        "count": songs.len(),
    })))
}
