use crate::error::AppError;
use crate::twitter::ApiHandle;
use crate::views;
use axum::{
    Extension,
    response::{Html, IntoResponse},
};

pub async fn home_handler(
    Extension(api): Extension<ApiHandle>,
) -> Result<impl IntoResponse, AppError> {
    let user = api.verify_credentials().await?;

    Ok(Html(views::home_page(&user)))
}
