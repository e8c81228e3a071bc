use crate::error::AppError;
use crate::models::AppState;
use crate::models::oauth::{IdentitySession, VerifyParams};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

pub async fn callback_handler(
    Query(params): Query<VerifyParams>,
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let mut identity = IdentitySession::load(&session).await?;

    if params.denied.is_some() {
        tracing::info!("user denied authorization");
        identity.abandon_handshake();
        identity.store(&session).await?;
        return Ok(Redirect::to("/"));
    }

    let verifier = params.oauth_verifier.ok_or(AppError::MissingVerifier)?;

    let result = identity
        .complete_handshake(&app_state.twitter, &verifier, params.oauth_token.as_deref())
        .await;

    // The request token is gone either way.
    identity.store(&session).await?;
    result?;

    // New privileges, new session id.
    session.cycle_id().await?;

    tracing::info!(
        screen_name = identity.screen_name.as_deref().unwrap_or("unknown"),
        "signed in"
    );
    Ok(Redirect::to("/home"))
}
