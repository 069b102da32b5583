use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::AccessToken,
    utils,
};

/// Seconds before expiry at which a token is considered stale.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Holds the current Spotify app token.
///
/// The holder is an explicit value owned by whoever talks to Spotify (the
/// server state or a CLI command) and is refreshed on demand.
#[derive(Debug, Default)]
pub struct TokenHolder {
    token: Option<AccessToken>,
}

impl TokenHolder {
    pub fn new() -> Self {
        TokenHolder { token: None }
    }

    pub fn with_token(token: AccessToken) -> Self {
        TokenHolder { token: Some(token) }
    }

    /// Returns a usable access token, requesting a new one when none is held
    /// or the held one is about to expire.
    pub async fn get_valid_token(&mut self, client: &SpotifyClient) -> Result<String, SpotifyError> {
        match &self.token {
            Some(token) if !is_expired(token, utils::unix_now()) => {
                Ok(token.access_token.clone())
            }
            _ => {
                let token = client.request_token().await?;
                let access_token = token.access_token.clone();
                self.token = Some(token);
                Ok(access_token)
            }
        }
    }

    pub fn current_token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

pub fn is_expired(token: &AccessToken, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
