use serde::{Deserialize, Serialize};
use std::fmt;

/// A key/secret pair: consumer credentials, a request token or an access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Per-browser OAuth state, stored in the session under [`IDENTITY_SESSION_KEY`].
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct IdentitySession {
    pub request_token: Option<Credentials>,
    pub access_token: Option<Credentials>,
    pub screen_name: Option<String>,
}

pub const IDENTITY_SESSION_KEY: &str = "identity";

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub oauth_verifier: Option<String>,
    pub oauth_token: Option<String>,
    pub denied: Option<String>,
}
