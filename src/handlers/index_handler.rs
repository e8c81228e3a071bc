use crate::error::AppError;
use crate::models::oauth::IdentitySession;
use crate::views;
use axum::response::{Html, IntoResponse};
use tower_sessions::Session;

pub async fn index_handler(session: Session) -> Result<impl IntoResponse, AppError> {
    let identity = IdentitySession::load(&session).await?;

    Ok(Html(views::index_page(identity.is_authenticated())))
}
