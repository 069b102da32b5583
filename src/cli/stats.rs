use std::collections::HashMap;

use tabled::Table;

use crate::{
    discovery::calculate_discovery_stats,
    error, info,
    management::LibraryStore,
    types::{BreakdownTableRow, Recommendation, Song},
    warning,
};

pub async fn stats() {
    let store = LibraryStore::from_env();

    let songs: Vec<Song> = match store.imported_songs().await {
        Ok(songs) => songs.into_iter().map(|s| s.record).collect(),
        Err(e) => error!("Failed to load imported songs: {}", e),
    };
    let recommendations: Vec<Recommendation> = match store.recommendations().await {
        Ok(recs) => recs.into_iter().map(|r| r.record).collect(),
        Err(e) => error!("Failed to load recommendations: {}", e),
    };

    if recommendations.is_empty() {
        warning!("No recommendations stored yet. Run tunescout recommend first.");
    }

    let stats = calculate_discovery_stats(&songs, &recommendations);

    info!(
        "{} of {} recommended artists are new ({}%)",
        stats.new_artists_count, stats.total_recommended_artists, stats.new_artists_percentage
    );
    info!(
        "{} recommendations, average tempo {} BPM",
        stats.total_recommendations, stats.average_tempo
    );

    if !stats.genre_breakdown.is_empty() {
        println!("{}", Table::new(breakdown_rows(&stats.genre_breakdown)));
    }
    if !stats.mood_breakdown.is_empty() {
        println!("{}", Table::new(breakdown_rows(&stats.mood_breakdown)));
    }
}

fn breakdown_rows(breakdown: &HashMap<String, usize>) -> Vec<BreakdownTableRow> {
    let mut rows: Vec<BreakdownTableRow> = breakdown
        .iter()
        .map(|(value, count)| BreakdownTableRow {
            value: value.clone(),
            count: *count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    rows
}
