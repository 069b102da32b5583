use std::collections::HashMap;

use tabled::Table;

use crate::{
    error,
    management::LibraryStore,
    success,
    types::{Recommendation, RecommendationTableRow},
    warning,
};

pub async fn list_playlist() {
    let store = LibraryStore::from_env();

    let entries = match store.playlist().await {
        Ok(entries) => entries,
        Err(e) => error!("Failed to load playlist: {}", e),
    };

    if entries.is_empty() {
        warning!("The built playlist is empty.");
        return;
    }

    let recommendations: HashMap<String, Recommendation> = match store.recommendations().await {
        Ok(recs) => recs
            .into_iter()
            .map(|r| (r.record.id.clone(), r.record))
            .collect(),
        Err(e) => error!("Failed to load recommendations: {}", e),
    };

    let rows: Vec<RecommendationTableRow> = entries
        .iter()
        .filter_map(|entry| recommendations.get(&entry.song_id))
        .map(RecommendationTableRow::from)
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn set_playlist(song_ids: Vec<String>) {
    match LibraryStore::from_env().replace_playlist(&song_ids).await {
        Ok(entries) => success!("Playlist now holds {} songs", entries.len()),
        Err(e) => error!("Failed to update playlist: {}", e),
    }
}
