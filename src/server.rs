use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    gemini::{GeminiClient, RecommendationEngine},
    management::{LibraryStore, TokenHolder},
    spotify::SpotifyClient,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<SpotifyClient>,
    pub tokens: Arc<Mutex<TokenHolder>>,
    pub engine: Arc<RecommendationEngine>,
    pub store: Arc<Mutex<LibraryStore>>,
}

impl AppState {
    pub fn new(spotify: SpotifyClient, gemini: GeminiClient, store: LibraryStore) -> Self {
        Self {
            spotify: Arc::new(spotify),
            tokens: Arc::new(Mutex::new(TokenHolder::new())),
            engine: Arc::new(RecommendationEngine::new(gemini)),
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            SpotifyClient::from_env(),
            GeminiClient::from_env(),
            LibraryStore::from_env(),
        )
    }

    /// Returns a valid Spotify token, requesting one when needed.
    pub async fn access_token(&self) -> Result<String, api::ApiError> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.get_valid_token(&self.spotify).await?)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/import", post(api::import_playlist))
        .route("/api/recommend", post(api::recommend))
        .route("/api/recommend/mood", post(api::recommend_mood))
        .route("/api/search", get(api::search))
        .route("/api/preview/{track_id}", get(api::preview))
        .route("/api/stats", post(api::stats))
        .route("/api/songs", get(api::list_songs))
        .route("/api/recommendations", get(api::list_recommendations))
        .route(
            "/api/playlist",
            get(api::get_playlist).put(api::put_playlist),
        )
        .fallback(api::not_found)
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&crate::config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
