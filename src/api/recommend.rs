use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    gemini::{self, DEFAULT_MOOD_RECOMMENDATION_COUNT, DEFAULT_RECOMMENDATION_COUNT},
    server::AppState,
    types::{Recommendation, SongSummary},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub songs: Vec<SongSummary>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MoodRecommendRequest {
    #[serde(default)]
    pub songs: Vec<SongSummary>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

fn require_songs(songs: &[SongSummary]) -> Result<(), ApiError> {
    if songs.is_empty() {
        return Err(ApiError::BadRequest("Songs array is required".to_string()));
    }
    Ok(())
}

async fn store_recommendations(
    state: &AppState,
    recommendations: &[Recommendation],
) -> Result<(), ApiError> {
    if recommendations.is_empty() {
        return Ok(());
    }
    if let Err(e) = state
        .store
        .lock()
        .await
        .replace_recommendations(recommendations)
        .await
    {
        warning!("Failed to store recommendations: {}", e);
        return Err(e.into());
    }
    Ok(())
}

/// `POST /api/recommend` - recommends songs similar to the given playlist.
pub async fn recommend(
    Extension(state): Extension<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Value>, ApiError> {
    require_songs(&request.songs)?;

    let count = gemini::resolve_count(request.count, DEFAULT_RECOMMENDATION_COUNT);
    let recommendations = state.engine.recommend(&request.songs, count).await?;

    if recommendations.is_empty() {
        return Err(ApiError::Internal(
            "Failed to generate recommendations".to_string(),
        ));
    }

    store_recommendations(&state, &recommendations).await?;

    Ok(Json(json!({
        "success": true,
        "recommendations": recommendations,
        "count": recommendations.len(),
    })))
}

/// `POST /api/recommend/mood` - recommends songs of one mood.
pub async fn recommend_mood(
    Extension(state): Extension<AppState>,
    Json(request): Json<MoodRecommendRequest>,
) -> Result<Json<Value>, ApiError> {
    require_songs(&request.songs)?;

    let mood = request
        .mood
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "all".to_string());
    let count = gemini::resolve_count(request.count, DEFAULT_MOOD_RECOMMENDATION_COUNT);

    let recommendations = state
        .engine
        .recommend_for_mood(&request.songs, &mood, count)
        .await?;

    store_recommendations(&state, &recommendations).await?;

    Ok(Json(json!({
        "success": true,
        "mood": mood,
        "recommendations": recommendations,
        "count": recommendations.len(),
    })))
}
