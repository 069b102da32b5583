use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{discovery::calculate_discovery_stats, types::SongSummary};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    #[serde(default)]
    pub original_songs: Vec<SongSummary>,
    #[serde(default)]
    pub recommendations: Vec<SongSummary>,
}

/// `POST /api/stats` - discovery statistics for a playlist and its recommendations.
pub async fn stats(Json(request): Json<StatsRequest>) -> Json<Value> {
    let stats = calculate_discovery_stats(&request.original_songs, &request.recommendations);
    Json(json!({
        "success": true,
        "stats": stats,
    }))
}
