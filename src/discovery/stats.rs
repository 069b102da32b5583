use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    discovery::normalize::UNKNOWN,
    types::{Recommendation, Song, SongSummary},
};

/// Read access to the fields the statistics need.
///
/// Implemented for the stored [`Song`] and [`Recommendation`] records and for
/// the loosely typed [`SongSummary`] HTTP callers send, so
/// [`calculate_discovery_stats`] accepts any mix of them.
///
/// # Required Fields
///
/// - `artist` - Always present; records without one report `""`
/// - `genre`, `mood` - `None` is counted as `"Unknown"` in the breakdowns
/// - `tempo` - `None` is left out of the average
pub trait SongLike {
    fn artist(&self) -> &str;
    fn genre(&self) -> Option<&str>;
    fn mood(&self) -> Option<&str>;
    fn tempo(&self) -> Option<f64>;
}

impl SongLike for Song {
    fn artist(&self) -> &str {
        &self.artist
    }

    fn genre(&self) -> Option<&str> {
        Some(&self.genre)
    }

    fn mood(&self) -> Option<&str> {
        Some(self.mood.as_str())
    }

    fn tempo(&self) -> Option<f64> {
        Some(self.tempo as f64)
    }
}

impl SongLike for Recommendation {
    fn artist(&self) -> &str {
        &self.artist
    }

    fn genre(&self) -> Option<&str> {
        Some(&self.genre)
    }

    fn mood(&self) -> Option<&str> {
        Some(self.mood.as_str())
    }

    fn tempo(&self) -> Option<f64> {
        Some(self.tempo as f64)
    }
}

impl SongLike for SongSummary {
    fn artist(&self) -> &str {
        self.artist.as_deref().unwrap_or_default()
    }

    fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    fn tempo(&self) -> Option<f64> {
        self.tempo
    }
}

/// Summary of how far a recommendation list strays from its playlist.
///
/// Serialized with camelCase keys (`newArtistsPercentage`, `genreBreakdown`,
/// ...) as returned by `POST /api/stats`.
///
/// # Fields
///
/// * `new_artists_percentage` - Share of recommended artists absent from the
///   playlist, 0-100 rounded to one decimal
/// * `new_artists_count` - Number of those new artists
/// * `total_recommended_artists` - Distinct artists among the recommendations
/// * `genre_breakdown`, `mood_breakdown` - Occurrences per value
/// * `average_tempo` - Mean of the positive tempos, rounded; 0 when none
/// * `total_recommendations` - Length of the recommendation list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryStats {
    pub new_artists_percentage: f64,
    pub new_artists_count: usize,
    pub total_recommended_artists: usize,
    pub genre_breakdown: HashMap<String, usize>,
    pub mood_breakdown: HashMap<String, usize>,
    pub average_tempo: u32,
    pub total_recommendations: usize,
}

/// Compares a playlist with its recommendations.
///
/// Artists are compared by exact string equality. A song without an artist
/// counts as the empty-string artist, a missing genre or mood as `"Unknown"`.
/// Only positive tempos contribute to the average.
///
/// # Arguments
///
/// * `original` - Songs of the source playlist
/// * `recommendations` - Recommended songs to evaluate
///
/// # Returns
///
/// A [`DiscoveryStats`]. Empty inputs yield zeroed counts and empty
/// breakdowns, never an error.
pub fn calculate_discovery_stats<O, R>(original: &[O], recommendations: &[R]) -> DiscoveryStats
where
    O: SongLike,
    R: SongLike,
{
    let original_artists: HashSet<&str> = original.iter().map(SongLike::artist).collect();
    let recommended_artists: HashSet<&str> =
        recommendations.iter().map(SongLike::artist).collect();
    let new_artists_count = recommended_artists.difference(&original_artists).count();

    let new_artists_percentage = if recommended_artists.is_empty() {
        0.0
    } else {
        round_to_tenth(new_artists_count as f64 / recommended_artists.len() as f64 * 100.0)
    };

    let tempos: Vec<f64> = recommendations
        .iter()
        .filter_map(SongLike::tempo)
        .filter(|tempo| tempo.is_finite() && *tempo > 0.0)
        .collect();
    let average_tempo = if tempos.is_empty() {
        0
    } else {
        (tempos.iter().sum::<f64>() / tempos.len() as f64).round() as u32
    };

    DiscoveryStats {
        new_artists_percentage,
        new_artists_count,
        total_recommended_artists: recommended_artists.len(),
        genre_breakdown: breakdown(recommendations.iter().map(SongLike::genre)),
        mood_breakdown: breakdown(recommendations.iter().map(SongLike::mood)),
        average_tempo,
        total_recommendations: recommendations.len(),
    }
}

fn breakdown<'a>(values: impl Iterator<Item = Option<&'a str>>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for value in values {
        *counts
            .entry(value.unwrap_or(UNKNOWN).to_string())
            .or_insert(0) += 1;
    }
    counts
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
