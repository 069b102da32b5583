use reqwest::StatusCode;

use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{AudioFeatures, SearchResponse, Song, SpotifyTrack},
    warning,
};

pub const SEARCH_LIMIT: u32 = 10;

impl SpotifyClient {
    /// Retrieves valence, energy and tempo for a track.
    ///
    /// The features only feed mood and tempo derivation, so any failure is
    /// logged and yields empty features, which normalization fills with
    /// defaults.
    pub async fn get_audio_features(&self, token: &str, track_id: &str) -> AudioFeatures {
        let api_url = self.endpoint(&format!("audio-features/{}", track_id));

        let response = match self.http.get(&api_url).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(e) => {
                warning!("Audio features request for {} failed: {}", track_id, e);
                return AudioFeatures::default();
            }
        };

        if !response.status().is_success() {
            return AudioFeatures::default();
        }

        response.json::<AudioFeatures>().await.unwrap_or_default()
    }

    /// Searches the catalog for tracks matching `query`.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid app access token
    /// * `query` - Free text, e.g. `"song title artist"`
    /// * `limit` - Maximum number of tracks to return
    ///
    /// # Returns
    ///
    /// Normalized songs, each enriched with audio features. A non-success
    /// status is returned as [`SpotifyError::Status`].
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Song>, SpotifyError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(self.endpoint("search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::Status(response.status()));
        }

        let json = response.json::<SearchResponse>().await?;
        let tracks = json.tracks.map(|page| page.items).unwrap_or_default();

        let mut results = Vec::with_capacity(tracks.len());
        for track in tracks {
            results.push(self.enrich_and_normalize(token, track).await);
        }
        Ok(results)
    }

    /// Looks up the 30 second preview URL of a track.
    ///
    /// Returns `Ok(None)` when the track does not exist or has no preview.
    pub async fn get_track_preview(
        &self,
        token: &str,
        track_id: &str,
    ) -> Result<Option<String>, SpotifyError> {
        let response = self
            .http
            .get(self.endpoint(&format!("tracks/{}", track_id)))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => return Ok(None),
            status if !status.is_success() => return Err(SpotifyError::Status(status)),
            _ => {}
        }

        let track = response.json::<SpotifyTrack>().await?;
        Ok(track.preview_url.filter(|url| !url.is_empty()))
    }
}
