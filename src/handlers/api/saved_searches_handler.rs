use crate::error::AppError;
use crate::models::saved_search::project_saved_searches;
use crate::twitter::ApiHandle;
use axum::{
    Extension,
    response::{IntoResponse, Json},
};

pub async fn saved_searches_handler(
    Extension(api): Extension<ApiHandle>,
) -> Result<impl IntoResponse, AppError> {
    let searches = api.saved_searches().await?;
    let entries = project_saved_searches(searches)?;

    Ok(Json(entries))
}
