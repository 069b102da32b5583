//! # Gemini Integration Module
//!
//! Talks to the Gemini `generateContent` endpoint and turns playlists into
//! recommendation prompts. The raw completion text is handed to
//! [`parse_recommendations`](crate::discovery::parse_recommendations), which
//! owns all validation; this module only moves text back and forth.
//!
//! - [`GeminiClient`] - Thin HTTP client for one model
//! - [`RecommendationEngine`] - Prompt construction plus parsing
//! - [`prompt`] - Playlist context and prompt templates

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::{
    config,
    discovery::parse_recommendations,
    types::{Content, GenerateContentRequest, GenerateContentResponse, Part, Recommendation, SongSummary},
    utils,
};

pub mod prompt;

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 15;
pub const DEFAULT_MOOD_RECOMMENDATION_COUNT: usize = 10;
pub const MAX_RECOMMENDATION_COUNT: usize = 50;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("Gemini API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Gemini response contained no text")]
    EmptyResponse,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = utils::http_client(timeout);

        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            config::gemini_apiurl(),
            config::gemini_api_key(),
            config::gemini_model(),
            config::request_timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends a single-turn prompt and returns the completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let api_url = format!(
            "{uri}/models/{model}:generateContent",
            uri = self.api_url,
            model = self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .http
            .post(&api_url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json = response.json::<GenerateContentResponse>().await?;
        let text = json
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Builds recommendation prompts and validates what the model answers.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    client: GeminiClient,
}

impl RecommendationEngine {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// Recommends `count` songs similar to the playlist.
    ///
    /// Transport and API failures are errors. Output that cannot be parsed
    /// yields an empty list.
    pub async fn recommend(
        &self,
        songs: &[SongSummary],
        count: usize,
    ) -> Result<Vec<Recommendation>, GeminiError> {
        let context = prompt::song_context(songs);
        let text = self
            .client
            .generate(&prompt::playlist_prompt(&context, count))
            .await?;
        Ok(parse_recommendations(&text, count))
    }

    /// Recommends `count` songs of the given mood that still fit the playlist.
    pub async fn recommend_for_mood(
        &self,
        songs: &[SongSummary],
        mood: &str,
        count: usize,
    ) -> Result<Vec<Recommendation>, GeminiError> {
        let context = prompt::song_context(songs);
        let text = self
            .client
            .generate(&prompt::mood_prompt(&context, mood, count))
            .await?;
        Ok(parse_recommendations(&text, count))
    }
}

/// Resolves a requested count, applying the default and the upper bound.
///
/// # Arguments
///
/// * `requested` - Count supplied by the caller, if any
/// * `default` - Count used when nothing (or zero) was requested
///
/// # Returns
///
/// The count to ask the model for, at most [`MAX_RECOMMENDATION_COUNT`].
///
/// # Example
///
/// ```
/// use tunescout::gemini::{resolve_count, DEFAULT_RECOMMENDATION_COUNT};
///
/// assert_eq!(resolve_count(None, DEFAULT_RECOMMENDATION_COUNT), 15);
/// assert_eq!(resolve_count(Some(500), DEFAULT_RECOMMENDATION_COUNT), 50);
/// ```
pub fn resolve_count(requested: Option<usize>, default: usize) -> usize {
    requested
        .filter(|count| *count > 0)
        .unwrap_or(default)
        .min(MAX_RECOMMENDATION_COUNT)
}
