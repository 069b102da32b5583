//! # API Module
//!
//! HTTP handlers for the discovery backend, mounted under `/api` by
//! [`crate::server::router`]. Handlers receive the shared
//! [`AppState`](crate::server::AppState) through an axum `Extension` and answer
//! with JSON. Failures are returned as [`ApiError`], rendered as
//! `{"error": "..."}` with a matching status code.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - [`health`]
//! - `POST /api/import` - [`import_playlist`]
//! - `POST /api/recommend` - [`recommend`]
//! - `POST /api/recommend/mood` - [`recommend_mood`]
//! - `GET /api/search` - [`search`]
//! - `GET /api/preview/{track_id}` - [`preview`]
//! - `POST /api/stats` - [`stats`]
//! - `GET /api/songs`, `GET /api/recommendations` - stored lists
//! - `GET /api/playlist`, `PUT /api/playlist` - the built playlist

mod error;
mod health;
mod import;
mod library;
mod recommend;
mod search;
mod stats;

pub use error::ApiError;
pub use health::health;
pub use health::not_found;
pub use import::import_playlist;
pub use library::get_playlist;
pub use library::list_recommendations;
pub use library::list_songs;
pub use library::put_playlist;
pub use recommend::recommend;
pub use recommend::recommend_mood;
pub use search::preview;
pub use search::search;
pub use stats::stats;
