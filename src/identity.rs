//! Three-legged OAuth1 handshake, tracked per browser session.
//!
//! The identity state lives in the `tower-sessions` session of each browser,
//! so two visitors signing in at once never see each other's tokens. Two tabs
//! of the same browser do share it: starting a second handshake replaces the
//! first pending request token.

use crate::error::ProviderError;
use crate::models::oauth::{IDENTITY_SESSION_KEY, IdentitySession};
use crate::twitter::{ApiHandle, TwitterClient};
use tower_sessions::Session;
use url::Url;

impl IdentitySession {
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(session
            .get::<IdentitySession>(IDENTITY_SESSION_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn store(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(IDENTITY_SESSION_KEY, self).await
    }

    /// Obtains a request token and returns the provider authorization URL.
    pub async fn begin_handshake(&mut self, client: &TwitterClient) -> Result<Url, ProviderError> {
        let request_token = client.request_token().await?;
        let url = client.authorize_url(&request_token)?;
        self.request_token = Some(request_token);
        Ok(url)
    }

    /// Exchanges the pending request token and `verifier` for an access token.
    ///
    /// The request token is consumed even when the exchange fails, so a
    /// second attempt with the same token is rejected with
    /// [`ProviderError::MissingRequestToken`].
    pub async fn complete_handshake(
        &mut self,
        client: &TwitterClient,
        verifier: &str,
        callback_token: Option<&str>,
    ) -> Result<ApiHandle, ProviderError> {
        let request_token = self
            .request_token
            .take()
            .ok_or(ProviderError::MissingRequestToken)?;

        if let Some(callback_token) = callback_token {
            if callback_token != request_token.key {
                return Err(ProviderError::StaleRequestToken);
            }
        }

        let grant = client.access_token(&request_token, verifier).await?;
        self.access_token = Some(grant.token.clone());
        self.screen_name = grant.screen_name;

        Ok(client.api(grant.token))
    }

    pub fn api_handle(&self, client: &TwitterClient) -> Option<ApiHandle> {
        self.access_token
            .as_ref()
            .map(|token| client.api(token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Drops a pending request token, e.g. when the user denied access.
    pub fn abandon_handshake(&mut self) {
        self.request_token = None;
    }
}
