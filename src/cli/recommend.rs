use tabled::Table;

use crate::{
    cli::{recommendation_rows, spinner},
    error,
    gemini::{
        self, DEFAULT_MOOD_RECOMMENDATION_COUNT, DEFAULT_RECOMMENDATION_COUNT, GeminiClient,
        RecommendationEngine,
    },
    management::LibraryStore,
    success,
    types::SongSummary,
    warning,
};

pub async fn recommend(mood: Option<String>, count: Option<usize>) {
    let store = LibraryStore::from_env();
    let songs: Vec<SongSummary> = match store.imported_songs().await {
        Ok(songs) => songs.iter().map(|s| SongSummary::from(&s.record)).collect(),
        Err(e) => error!("Failed to load imported songs: {}", e),
    };

    if songs.is_empty() {
        error!("No imported songs found. Run tunescout import <playlist-url> first.");
    }

    let engine = RecommendationEngine::new(GeminiClient::from_env());
    let pb = spinner(&format!(
        "Asking {} for recommendations...",
        engine.client().model()
    ));
    let result = match &mood {
        Some(mood) => {
            let count = gemini::resolve_count(count, DEFAULT_MOOD_RECOMMENDATION_COUNT);
            engine.recommend_for_mood(&songs, mood, count).await
        }
        None => {
            let count = gemini::resolve_count(count, DEFAULT_RECOMMENDATION_COUNT);
            engine.recommend(&songs, count).await
        }
    };
    pb.finish_and_clear();

    let recommendations = match result {
        Ok(recommendations) => recommendations,
        Err(e) => error!("Failed to generate recommendations: {}", e),
    };

    if recommendations.is_empty() {
        warning!("The model returned no usable recommendations.");
        return;
    }

    if let Err(e) = store.replace_recommendations(&recommendations).await {
        error!("Failed to store recommendations: {}", e);
    }

    println!("{}", Table::new(recommendation_rows(&recommendations)));
    success!("Stored {} recommendations", recommendations.len());
}
