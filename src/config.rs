//! Configuration management for tunescout.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Provider credentials, endpoint URLs, the server
//! address and the store location are all read from here.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist and loads variables
/// from `tunescout/.env` inside it, then from a `.env` in the working
/// directory. Variables that are already set are never overridden, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunescout/.env`
/// - macOS: `~/Library/Application Support/tunescout/.env`
/// - Windows: `%LOCALAPPDATA%/tunescout/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunescout/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the address the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:5000`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify client ID used for the client credentials flow.
pub fn spotify_client_id() -> Option<String> {
    optional_var("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify client secret used for the client credentials flow.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    optional_var("SPOTIFY_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify token endpoint.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the Gemini API key.
pub fn gemini_api_key() -> Option<String> {
    optional_var("GEMINI_API_KEY")
}

/// Returns the Gemini API base URL.
pub fn gemini_apiurl() -> String {
    var_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)
}

/// Returns the Gemini model used for recommendations.
pub fn gemini_model() -> String {
    var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL)
}

/// Returns the directory holding the library store collections.
///
/// Reads `TUNESCOUT_DATA_DIR`, falling back to `tunescout/store` inside the
/// platform's local data directory.
pub fn data_dir() -> PathBuf {
    match optional_var("TUNESCOUT_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("tunescout/store");
            path
        }
    }
}

/// Returns the timeout applied to every outbound provider request.
pub fn request_timeout() -> Duration {
    let secs = optional_var("REQUEST_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
