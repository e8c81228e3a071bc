use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
}

/// Any failure talking to the identity provider or sequencing the handshake.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request token not set yet")]
    MissingRequestToken,

    #[error("callback token does not match the pending request token")]
    StaleRequestToken,

    #[error("provider did not confirm the callback URL")]
    CallbackNotConfirmed,

    #[error("provider rejected the request (HTTP {status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("missing oauth_verifier")]
    MissingVerifier,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let status = match self {
            AppError::MissingVerifier => StatusCode::BAD_REQUEST,
            AppError::Provider(_) | AppError::Session(_) | AppError::Timestamp(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failures_are_server_errors() {
        let response = AppError::from(ProviderError::MissingRequestToken).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_verifier_is_bad_request() {
        let response = AppError::MissingVerifier.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
