use crate::error::AppError;
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

pub async fn logout_handler(session: Session) -> Result<impl IntoResponse, AppError> {
    session.flush().await?;

    Ok(Redirect::to("/"))
}
