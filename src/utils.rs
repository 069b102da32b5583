use std::{collections::HashSet, time::Duration};

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;

use crate::{types::Song, warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Spotify,
    AppleMusic,
    Unsupported,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::AppleMusic => "apple_music",
            Platform::Unsupported => "unsupported",
        }
    }
}

/// Tells which streaming service a playlist URL belongs to.
pub fn detect_platform(playlist_url: &str) -> Platform {
    if playlist_url.contains("spotify.com") {
        Platform::Spotify
    } else if playlist_url.contains("music.apple.com") {
        Platform::AppleMusic
    } else {
        Platform::Unsupported
    }
}

/// Extracts the playlist id from a Spotify playlist URL.
///
/// The id is the run of ASCII alphanumerics following `playlist/`, so query
/// strings such as `?si=...` are ignored.
pub fn extract_playlist_id(playlist_url: &str) -> Option<String> {
    let (_, rest) = playlist_url.split_once("playlist/")?;
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();

    if id.is_empty() { None } else { Some(id) }
}

pub fn remove_duplicate_songs(songs: &mut Vec<Song>) {
    let mut seen_ids = HashSet::new();
    songs.retain(|song| seen_ids.insert(song.id.clone()));
}

pub fn generate_entry_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    Utc::now().timestamp() as u64
}

/// Builds the HTTP client shared by the provider clients.
///
/// If the configured client cannot be built (e.g. the TLS backend fails to
/// initialize) a default client without the timeout is used and a warning
/// is printed.
pub fn http_client(timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warning!(
                "Cannot build HTTP client with a {}s timeout, requests are unbounded. Err: {}",
                timeout.as_secs(),
                e
            );
            Client::new()
        }
    }
}
