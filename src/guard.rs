use crate::error::AppError;
use crate::models::AppState;
use crate::models::oauth::IdentitySession;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Lets the request through only when the browser session holds an access
/// token. The derived [`ApiHandle`](crate::twitter::ApiHandle) is placed in
/// the request extensions for the handler; otherwise the caller is sent back
/// to the entry page and the handler never runs.
pub async fn require_login(
    State(app_state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = IdentitySession::load(&session).await?;

    let Some(api) = identity.api_handle(&app_state.twitter) else {
        tracing::debug!(path = %request.uri().path(), "not signed in, redirecting");
        return Ok(Redirect::to("/").into_response());
    };

    request.extensions_mut().insert(api);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::oauth::Credentials;
    use crate::test_support::{CALLBACK_URL, FakeProvider};
    use crate::models::AppConfig;
    use crate::twitter::ApiHandle;
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode, header},
        middleware,
        routing::get,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    fn test_state(provider: &FakeProvider) -> AppState {
        AppState::new(AppConfig {
            consumer: Credentials::new("consumer-key", "consumer-secret"),
            callback_url: CALLBACK_URL.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            api_base: provider.base.clone(),
            static_dir: "static".into(),
        })
    }

    fn guarded_router(state: AppState, ran: Arc<AtomicBool>) -> Router {
        let expected = state.twitter.api(Credentials::new("acc-token", "acc-secret"));

        Router::new()
            .route(
                "/protected",
                get(move |Extension(api): Extension<ApiHandle>| {
                    let ran = ran.clone();
                    let expected = expected.clone();
                    async move {
                        ran.store(true, Ordering::SeqCst);
                        assert_eq!(api, expected);
                        "secret"
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_login))
            .route(
                "/sign-in",
                get(|session: Session| async move {
                    let identity = IdentitySession {
                        access_token: Some(Credentials::new("acc-token", "acc-secret")),
                        ..Default::default()
                    };
                    identity.store(&session).await.unwrap();
                    "ok"
                }),
            )
            .layer(SessionManagerLayer::new(MemoryStore::default()))
            .with_state(state)
    }

    #[tokio::test]
    async fn anonymous_request_is_redirected_without_running_handler() {
        let provider = FakeProvider::spawn().await;
        let ran = Arc::new(AtomicBool::new(false));
        let app = guarded_router(test_state(&provider), ran.clone());

        let response = app
            .oneshot(Request::get("/protected").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn signed_in_request_reaches_handler_with_api_handle() {
        let provider = FakeProvider::spawn().await;
        let ran = Arc::new(AtomicBool::new(false));
        let app = guarded_router(test_state(&provider), ran.clone());

        let response = app
            .clone()
            .oneshot(Request::get("/sign-in").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get("/protected")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(ran.load(Ordering::SeqCst));
    }
}
