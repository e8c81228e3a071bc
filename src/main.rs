mod error;
mod guard;
mod handlers;
mod identity;
mod models;
mod routes;
mod twitter;
mod views;

#[cfg(test)]
mod test_support;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use models::{AppConfig, AppState};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saved_search_viewer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_config = AppConfig::from_env()?;
    let bind_addr = app_config.bind_addr.clone();

    tracing::info!(
        api_base = %app_config.api_base,
        callback_url = %app_config.callback_url,
        "configuration loaded"
    );

    let app = routes::build_router(AppState::new(app_config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
