use crate::error::AppError;
use crate::models::AppState;
use crate::models::oauth::IdentitySession;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let mut identity = IdentitySession::load(&session).await?;

    let authorize_url = identity.begin_handshake(&app_state.twitter).await?;
    identity.store(&session).await?;

    tracing::info!(session_id = ?session.id(), "request token stored, redirecting to provider");
    Ok(Redirect::to(authorize_url.as_str()))
}
