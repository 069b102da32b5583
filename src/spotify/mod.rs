//! # Spotify Integration Module
//!
//! Client for the parts of the Spotify Web API the playlist import needs. It
//! authenticates with the client credentials flow and never acts on behalf of
//! a user, so only public playlist and catalog data is reachable.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers / CLI
//!          ↓
//! TokenHolder (management) ──→ auth::request_token
//!          ↓
//! SpotifyClient
//!     ├── playlist (full playlist fetch + audio features)
//!     └── tracks (search, preview lookup)
//!          ↓
//! discovery::normalize_track
//! ```
//!
//! Every call takes the access token explicitly. The client itself holds only
//! immutable configuration and can be shared between handlers behind an
//! `Arc`.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client credentials token
//! - `GET /playlists/{id}/tracks` - Playlist items, 100 per page
//! - `GET /audio-features/{id}` - Valence, energy and tempo
//! - `GET /search` - Track search
//! - `GET /tracks/{id}` - Single track lookup for previews
//!
//! ## Error Handling
//!
//! Transport failures and rejected token requests surface as
//! [`SpotifyError`]. Missing audio features and failed follow-up playlist
//! pages are logged and degrade to defaults or a partial list. There is no
//! retry policy.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config, utils};

pub mod auth;
pub mod playlist;
pub mod tracks;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify credentials are not configured (SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET)")]
    MissingCredentials,
    #[error("Spotify rejected the token request with status {0}")]
    TokenRejected(StatusCode),
    #[error("Spotify request failed with status {0}")]
    Status(StatusCode),
    #[error("invalid Spotify playlist URL: {0}")]
    InvalidPlaylistUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    credentials: Option<SpotifyCredentials>,
}

impl SpotifyClient {
    pub fn new(
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        credentials: Option<SpotifyCredentials>,
        timeout: Duration,
    ) -> Self {
        let http = utils::http_client(timeout);

        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            credentials,
        }
    }

    /// Builds a client from `SPOTIFY_*` environment configuration.
    pub fn from_env() -> Self {
        let credentials = match (config::spotify_client_id(), config::spotify_client_secret()) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Self::new(
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
            credentials,
            config::request_timeout(),
        )
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{uri}/{path}", uri = self.api_url, path = path)
    }
}
