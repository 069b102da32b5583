//! # CLI Module
//!
//! Command-line front end for the discovery backend. Every command talks to
//! the same clients and store as the HTTP surface, so a playlist imported
//! from the terminal is visible through `GET /api/songs` and vice versa.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP server
//! - [`import`] - Imports a Spotify playlist into the store
//! - [`recommend`] - Asks Gemini for recommendations based on the stored import
//! - [`stats`] - Prints discovery statistics for the stored lists
//! - [`search`] - Searches Spotify for tracks
//! - [`list_playlist`] / [`set_playlist`] - Shows or replaces the built playlist
//!
//! ## Usage Patterns
//!
//! ```bash
//! tunescout import https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! tunescout recommend --count 20
//! tunescout recommend --mood chill
//! tunescout stats
//! tunescout playlist set rec_0 rec_3
//! tunescout serve
//! ```
//!
//! Fatal problems (missing credentials, unreachable APIs, corrupt store
//! files) are reported with `error!` and end the process.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{Recommendation, RecommendationTableRow, Song, SongTableRow};

mod import;
mod playlist;
mod recommend;
mod search;
mod serve;
mod stats;

pub use import::import;
pub use playlist::list_playlist;
pub use playlist::set_playlist;
pub use recommend::recommend;
pub use search::search;
pub use serve::serve;
pub use stats::stats;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        SongTableRow {
            title: song.title.clone(),
            artist: song.artist.clone(),
            tempo: song.tempo,
            mood: song.mood.to_string(),
        }
    }
}

impl From<&Recommendation> for RecommendationTableRow {
    fn from(rec: &Recommendation) -> Self {
        RecommendationTableRow {
            id: rec.id.clone(),
            title: rec.title.clone(),
            artist: rec.artist.clone(),
            genre: rec.genre.clone(),
            mood: rec.mood.to_string(),
            score: format!("{:.2}", rec.match_score),
        }
    }
}

pub(crate) fn song_rows(songs: &[Song]) -> Vec<SongTableRow> {
    songs.iter().map(SongTableRow::from).collect()
}

pub(crate) fn recommendation_rows(recommendations: &[Recommendation]) -> Vec<RecommendationTableRow> {
    recommendations
        .iter()
        .map(RecommendationTableRow::from)
        .collect()
}
