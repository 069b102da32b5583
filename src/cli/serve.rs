use crate::{Res, info, server, warning};

pub async fn serve() -> Res<()> {
    let state = server::AppState::from_env();

    if !state.engine.client().has_api_key() {
        warning!("GEMINI_API_KEY not found, recommendations will fail");
    }
    if !state.spotify.has_credentials() {
        warning!("Spotify credentials not found, imports will fail");
    }

    info!("Serving discovery backend on http://{}/api", crate::config::server_addr());
    server::start_api_server(state).await
}
