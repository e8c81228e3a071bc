//! In-process stand-in for the provider's OAuth and REST endpoints.

use crate::models::app_config::parse_api_base;
use crate::models::oauth::Credentials;
use crate::twitter::TwitterClient;
use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use url::Url;

pub const CALLBACK_URL: &str = "http://127.0.0.1:8000/verify";

pub struct FakeProvider {
    pub base: Url,
}

impl FakeProvider {
    pub async fn spawn() -> Self {
        let app = Router::new()
            .route("/oauth/request_token", post(request_token))
            .route("/oauth/access_token", post(access_token))
            .route(
                "/1.1/account/verify_credentials.json",
                get(verify_credentials),
            )
            .route("/1.1/saved_searches/list.json", get(saved_searches));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: parse_api_base(&format!("http://{}", addr)).unwrap(),
        }
    }

    pub fn client(&self, consumer_key: &str) -> TwitterClient {
        TwitterClient::new(
            reqwest::Client::new(),
            self.base.clone(),
            Credentials::new(consumer_key, "consumer-secret"),
            CALLBACK_URL.to_string(),
        )
    }
}

fn oauth_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn has_param(headers: &HeaderMap, name: &str, value: &str) -> bool {
    oauth_header(headers).contains(&format!("{}=\"{}\"", name, value))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Invalid or expired token.").into_response()
}

async fn request_token(headers: HeaderMap) -> Response {
    if !oauth_header(&headers).starts_with("OAuth ")
        || has_param(&headers, "oauth_consumer_key", "rejected-key")
        || !oauth_header(&headers).contains("oauth_callback=")
    {
        return unauthorized();
    }

    "oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true"
        .into_response()
}

async fn access_token(headers: HeaderMap) -> Response {
    if !has_param(&headers, "oauth_token", "req-token")
        || !has_param(&headers, "oauth_verifier", "good-verifier")
    {
        return unauthorized();
    }

    "oauth_token=acc-token&oauth_token_secret=acc-secret&user_id=42&screen_name=rustacean"
        .into_response()
}

async fn verify_credentials(headers: HeaderMap) -> Response {
    if !has_param(&headers, "oauth_token", "acc-token") {
        return unauthorized();
    }

    axum::Json(json!({
        "id": 42,
        "name": "Ferris <Crab>",
        "screen_name": "rustacean",
        "description": "Saved searches & more",
        "profile_image_url_https": "https://pbs.twimg.com/profile_images/ferris.png",
        "followers_count": 7,
        "friends_count": 3,
        "statuses_count": 120
    }))
    .into_response()
}

async fn saved_searches(headers: HeaderMap) -> Response {
    if !has_param(&headers, "oauth_token", "acc-token") {
        return unauthorized();
    }

    axum::Json(json!([
        {
            "created_at": "Mon Jan 02 03:04:05 +0000 2023",
            "id": 1,
            "id_str": "1",
            "name": "news",
            "position": null,
            "query": "#tech"
        },
        {
            "created_at": "Tue Jun 15 09:37:24 +0000 2010",
            "id": 9569704,
            "id_str": "9569704",
            "name": "@twitterapi",
            "position": null,
            "query": "@twitterapi"
        }
    ]))
    .into_response()
}
