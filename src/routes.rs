use crate::guard::require_login;
use crate::handlers::{
    callback_handler, home_handler, index_handler, login_handler, logout_handler,
    saved_searches_handler,
};
use crate::models::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub fn build_router(app_state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_expiry = Expiry::OnInactivity(Duration::hours(6));
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(session_expiry);

    let protected = Router::new()
        .route("/home", get(home_handler))
        .route("/api/saved_searches/list", get(saved_searches_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_login,
        ));

    Router::new()
        .route("/", get(index_handler))
        .route("/oauth", get(login_handler))
        .route("/verify", get(callback_handler))
        .route("/logout", post(logout_handler))
        .merge(protected)
        .nest_service("/static", ServeDir::new(&app_state.config.static_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
