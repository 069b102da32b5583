use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{AccessToken, TokenResponse},
    utils,
};

/// Encodes client credentials for the `Authorization: Basic` header.
pub fn basic_auth_value(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

impl SpotifyClient {
    /// Requests an app access token with the client credentials flow.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::MissingCredentials`] when no client id/secret is configured
    /// - [`SpotifyError::TokenRejected`] when the token endpoint answers non-200
    /// - [`SpotifyError::Http`] on network or decoding failures
    pub async fn request_token(&self) -> Result<AccessToken, SpotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SpotifyError::MissingCredentials)?;

        let res = self
            .http
            .post(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                basic_auth_value(&credentials.client_id, &credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(SpotifyError::TokenRejected(res.status()));
        }

        let json = res.json::<TokenResponse>().await?;

        Ok(AccessToken {
            access_token: json.access_token,
            expires_in: json.expires_in,
            obtained_at: utils::unix_now(),
        })
    }
}
