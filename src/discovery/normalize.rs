use crate::{
    discovery::{classify_mood, parser::tempo_from_f64},
    types::{AudioFeatures, Song, SpotifyTrack},
};

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const PLACEHOLDER_URL: &str = "#";

const DEFAULT_VALENCE: f64 = 0.5;
const DEFAULT_ENERGY: f64 = 0.5;
const DEFAULT_TEMPO: f64 = 120.0;

/// Converts a Spotify track object into a canonical [`Song`].
///
/// Artist names are joined with `", "`. A track without a provider id gets
/// `track_<title>`. Missing audio descriptors default to a valence and energy
/// of 0.5 and a tempo of 120 BPM before classification and clamping.
///
/// # Arguments
///
/// * `track` - Track object, with `audioFeatures` attached when known
///
/// # Returns
///
/// A [`Song`] whose title and artist are never empty, with `genre` set to
/// `"Unknown"` and `"#"` standing in for missing preview and Spotify URLs.
pub fn normalize_track(track: &SpotifyTrack) -> Song {
    let features = track.audio_features.unwrap_or_default();

    let raw_title = track.name.as_deref().map(str::trim).unwrap_or_default();
    let id = match track.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ if raw_title.is_empty() => "track_unknown".to_string(),
        _ => format!("track_{}", raw_title),
    };

    let title = if raw_title.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        raw_title.to_string()
    };

    let artist = track
        .artists
        .iter()
        .map(|a| a.name.trim())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let artist = if artist.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        artist
    };

    let album = track
        .album
        .as_ref()
        .and_then(|a| a.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    let album_art = track
        .album
        .as_ref()
        .and_then(|a| a.images.first())
        .map(|image| image.url.clone())
        .unwrap_or_default();

    let spotify_url = track
        .external_urls
        .as_ref()
        .and_then(|urls| urls.spotify.clone())
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    Song {
        id,
        title,
        artist,
        album,
        genre: UNKNOWN.to_string(),
        tempo: tempo_from_f64(features.tempo.unwrap_or(DEFAULT_TEMPO)),
        mood: mood_from_features(&features),
        preview_url: track
            .preview_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
        spotify_url: Some(spotify_url),
        album_art: Some(album_art),
    }
}

fn mood_from_features(features: &AudioFeatures) -> crate::discovery::Mood {
    classify_mood(
        features.valence.unwrap_or(DEFAULT_VALENCE),
        features.energy.unwrap_or(DEFAULT_ENERGY),
    )
}
