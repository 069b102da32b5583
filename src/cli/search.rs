use tabled::Table;

use crate::{
    cli::{song_rows, spinner},
    error,
    management::TokenHolder,
    spotify::{SpotifyClient, tracks::SEARCH_LIMIT},
    warning,
};

pub async fn search(query: String) {
    let client = SpotifyClient::from_env();
    let mut tokens = TokenHolder::new();
    let token = match tokens.get_valid_token(&client).await {
        Ok(token) => token,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };

    let pb = spinner("Searching tracks...");
    let result = client.search_tracks(&token, &query, SEARCH_LIMIT).await;
    pb.finish_and_clear();

    match result {
        Ok(songs) if songs.is_empty() => warning!("No tracks found for \"{}\"", query),
        Ok(songs) => println!("{}", Table::new(song_rows(&songs))),
        Err(e) => error!("Search failed: {}", e),
    }
}
