use tabled::Table;

use crate::{
    cli::{song_rows, spinner},
    error,
    management::{LibraryStore, TokenHolder},
    spotify::SpotifyClient,
    success,
    utils::{self, Platform},
    warning,
};

pub async fn import(playlist_url: String) {
    match utils::detect_platform(&playlist_url) {
        Platform::Spotify => {}
        Platform::AppleMusic => {
            error!("Apple Music playlists are not supported yet. Please use a Spotify URL.")
        }
        Platform::Unsupported => {
            error!("Unsupported playlist URL. Use a Spotify playlist URL.")
        }
    }

    let client = SpotifyClient::from_env();
    let mut tokens = TokenHolder::new();
    let token = match tokens.get_valid_token(&client).await {
        Ok(token) => token,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };

    let pb = spinner("Fetching playlist tracks...");
    let result = client.get_playlist_tracks(&token, &playlist_url).await;
    pb.finish_and_clear();

    let songs = match result {
        Ok(songs) if songs.is_empty() => {
            warning!("Playlist is empty, nothing imported.");
            return;
        }
        Ok(songs) => songs,
        Err(e) => error!("Failed to fetch playlist: {}", e),
    };

    if let Err(e) = LibraryStore::from_env().replace_imported_songs(&songs).await {
        error!("Failed to store imported songs: {}", e);
    }

    println!("{}", Table::new(song_rows(&songs)));
    success!("Imported {} songs", songs.len());
}
