use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::discovery::Mood;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub tempo: Option<f64>,
}

/// Track object as returned by the Spotify Web API.
///
/// `audioFeatures` is not part of the provider payload; the playlist import
/// attaches it after the features request so normalization stays a pure
/// mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub album: Option<SpotifyAlbum>,
    #[serde(default, rename = "audioFeatures")]
    pub audio_features: Option<AudioFeatures>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

/// Canonical imported track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub tempo: u32,
    pub mood: Mood,
    pub preview_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
}

/// Validated recommendation produced from model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub tempo: u32,
    pub mood: Mood,
    pub reason: String,
    pub preview_url: String,
    pub confidence: f64,
    pub match_score: f64,
}

/// Song-like record accepted from HTTP callers.
///
/// Clients send back whatever they received from import, possibly edited, so
/// every field is optional and `tempo` accepts numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub mood: Option<String>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

impl From<&Song> for SongSummary {
    fn from(song: &Song) -> Self {
        SongSummary {
            title: Some(song.title.clone()),
            artist: Some(song.artist.clone()),
            genre: Some(song.genre.clone()),
            tempo: Some(song.tempo as f64),
            mood: Some(song.mood.to_string()),
        }
    }
}

impl From<&Recommendation> for SongSummary {
    fn from(rec: &Recommendation) -> Self {
        SongSummary {
            title: Some(rec.title.clone()),
            artist: Some(rec.artist.clone()),
            genre: Some(rec.genre.clone()),
            tempo: Some(rec.tempo as f64),
            mood: Some(rec.mood.to_string()),
        }
    }
}

/// Entry of the built playlist, referencing a stored recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: String,
    pub song_id: String,
    pub added_at: u64,
}

/// Record wrapper adding the creation timestamp the store keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    #[serde(flatten)]
    pub record: T,
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub title: String,
    pub artist: String,
    pub tempo: u32,
    pub mood: String,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub mood: String,
    pub score: String,
}

#[derive(Tabled)]
pub struct BreakdownTableRow {
    pub value: String,
    pub count: usize,
}
