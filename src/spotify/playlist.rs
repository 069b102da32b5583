use crate::{
    discovery::normalize_track,
    spotify::{SpotifyClient, SpotifyError},
    types::{PlaylistTracksResponse, Song, SpotifyTrack},
    utils, warning,
};

const PAGE_LIMIT: usize = 100;

impl SpotifyClient {
    /// Fetches every track of a playlist and normalizes it into [`Song`]s.
    ///
    /// Pages of 100 items are requested until a page comes back short. A
    /// failing first page is an error; a failing later page ends the fetch
    /// with what was collected so far. Items without a track object (removed
    /// or unavailable tracks) are skipped, and repeated tracks keep only their
    /// first occurrence.
    ///
    /// Each track triggers one audio-features request to derive its mood and
    /// tempo.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid app access token
    /// * `playlist_url` - Public Spotify playlist URL, query string allowed
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Song>)` - Normalized songs in playlist order
    /// - `Err(SpotifyError::InvalidPlaylistUrl)` - No playlist id in the URL
    /// - `Err(SpotifyError::Status)` / `Err(SpotifyError::Http)` - The first
    ///   page could not be fetched
    ///
    /// # API Endpoint
    ///
    /// Uses `/playlists/{id}/tracks` with `offset` and `limit=100`.
    pub async fn get_playlist_tracks(
        &self,
        token: &str,
        playlist_url: &str,
    ) -> Result<Vec<Song>, SpotifyError> {
        let playlist_id = utils::extract_playlist_id(playlist_url)
            .ok_or_else(|| SpotifyError::InvalidPlaylistUrl(playlist_url.to_string()))?;

        let api_url = self.endpoint(&format!("playlists/{}/tracks", playlist_id));
        let mut songs = Vec::new();
        let mut offset = 0;

        loop {
            let page = match self.fetch_page(token, &api_url, offset).await {
                Ok(page) => page,
                Err(e) if offset == 0 => return Err(e),
                Err(e) => {
                    warning!(
                        "Stopped fetching playlist {} at offset {}: {}",
                        playlist_id,
                        offset,
                        e
                    );
                    break;
                }
            };
            let item_count = page.items.len();

            for track in page.items.into_iter().filter_map(|item| item.track) {
                songs.push(self.enrich_and_normalize(token, track).await);
            }

            if item_count < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        utils::remove_duplicate_songs(&mut songs);
        Ok(songs)
    }

    async fn fetch_page(
        &self,
        token: &str,
        api_url: &str,
        offset: usize,
    ) -> Result<PlaylistTracksResponse, SpotifyError> {
        let response = self
            .http
            .get(api_url)
            .bearer_auth(token)
            .query(&[("offset", offset), ("limit", PAGE_LIMIT)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::Status(response.status()));
        }

        Ok(response.json::<PlaylistTracksResponse>().await?)
    }

    /// Attaches audio features to a track and normalizes it.
    pub(crate) async fn enrich_and_normalize(&self, token: &str, mut track: SpotifyTrack) -> Song {
        if track.audio_features.is_none() {
            if let Some(id) = track.id.as_deref() {
                track.audio_features = Some(self.get_audio_features(token, id).await);
            }
        }
        normalize_track(&track)
    }
}
