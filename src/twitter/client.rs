use crate::error::ProviderError;
use crate::models::oauth::Credentials;
use crate::models::saved_search::SavedSearch;
use crate::models::user::User;
use crate::twitter::signature::SignedRequest;
use oauth2::CsrfToken;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use time::OffsetDateTime;
use url::Url;

const REQUEST_TOKEN_PATH: &str = "oauth/request_token";
const AUTHORIZE_PATH: &str = "oauth/authorize";
const ACCESS_TOKEN_PATH: &str = "oauth/access_token";
const VERIFY_CREDENTIALS_PATH: &str = "1.1/account/verify_credentials.json";
const SAVED_SEARCHES_PATH: &str = "1.1/saved_searches/list.json";

/// Result of a successful access-token exchange.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    pub token: Credentials,
    pub screen_name: Option<String>,
}

/// Process-wide provider client holding the consumer credentials.
#[derive(Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    api_base: Url,
    consumer: Credentials,
    callback_url: String,
}

impl TwitterClient {
    pub fn new(
        http: reqwest::Client,
        api_base: Url,
        consumer: Credentials,
        callback_url: String,
    ) -> Self {
        Self {
            http,
            api_base,
            consumer,
            callback_url,
        }
    }

    pub async fn request_token(&self) -> Result<Credentials, ProviderError> {
        let url = self.endpoint(REQUEST_TOKEN_PATH)?;
        let body = self
            .send_form(
                &url,
                None,
                &[("oauth_callback", self.callback_url.as_str())],
            )
            .await?;

        let mut fields = parse_form(&body);
        if fields.get("oauth_callback_confirmed").map(String::as_str) != Some("true") {
            return Err(ProviderError::CallbackNotConfirmed);
        }

        Ok(Credentials::new(
            take_field(&mut fields, "oauth_token")?,
            take_field(&mut fields, "oauth_token_secret")?,
        ))
    }

    pub fn authorize_url(&self, request_token: &Credentials) -> Result<Url, ProviderError> {
        let mut url = self.endpoint(AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("oauth_token", &request_token.key);
        Ok(url)
    }

    pub async fn access_token(
        &self,
        request_token: &Credentials,
        verifier: &str,
    ) -> Result<AccessGrant, ProviderError> {
        let url = self.endpoint(ACCESS_TOKEN_PATH)?;
        let body = self
            .send_form(&url, Some(request_token), &[("oauth_verifier", verifier)])
            .await?;

        let mut fields = parse_form(&body);
        let token = Credentials::new(
            take_field(&mut fields, "oauth_token")?,
            take_field(&mut fields, "oauth_token_secret")?,
        );

        Ok(AccessGrant {
            token,
            screen_name: fields.remove("screen_name"),
        })
    }

    /// Handle for calls made on behalf of the user owning `access_token`.
    pub fn api(&self, access_token: Credentials) -> ApiHandle {
        ApiHandle {
            client: self.clone(),
            access_token,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.api_base
            .join(path)
            .map_err(|e| ProviderError::Malformed(format!("bad endpoint {}: {}", path, e)))
    }

    async fn send_form(
        &self,
        url: &Url,
        token: Option<&Credentials>,
        oauth_extra: &[(&str, &str)],
    ) -> Result<String, ProviderError> {
        let method = Method::POST;
        let header = SignedRequest::new(&method, url, &self.consumer, token)
            .with_oauth_params(oauth_extra)
            .authorization_header(&new_nonce(), now_timestamp());

        let response = self
            .http
            .post(url.clone())
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?;

        read_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Credentials,
    ) -> Result<T, ProviderError> {
        let url = self.endpoint(path)?;
        let method = Method::GET;
        let header = SignedRequest::new(&method, &url, &self.consumer, Some(token))
            .authorization_header(&new_nonce(), now_timestamp());

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?;

        let body = read_success(response).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Authenticated API handle, derived from the access-token pair.
#[derive(Clone)]
pub struct ApiHandle {
    client: TwitterClient,
    access_token: Credentials,
}

impl ApiHandle {
    pub async fn verify_credentials(&self) -> Result<User, ProviderError> {
        self.client
            .get_json(VERIFY_CREDENTIALS_PATH, &self.access_token)
            .await
    }

    pub async fn saved_searches(&self) -> Result<Vec<SavedSearch>, ProviderError> {
        self.client
            .get_json(SAVED_SEARCHES_PATH, &self.access_token)
            .await
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        self.access_token == other.access_token
            && self.client.consumer == other.client.consumer
            && self.client.api_base == other.client.api_base
    }
}

impl std::fmt::Debug for ApiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHandle")
            .field("api_base", &self.client.api_base.as_str())
            .field("access_token", &self.access_token)
            .finish()
    }
}

async fn read_success(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(%status, "provider rejected request");
        return Err(ProviderError::Rejected { status, body });
    }

    Ok(body)
}

fn parse_form(body: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

fn take_field(fields: &mut HashMap<String, String>, name: &str) -> Result<String, ProviderError> {
    fields
        .remove(name)
        .ok_or_else(|| ProviderError::Malformed(format!("missing {}", name)))
}

fn new_nonce() -> String {
    CsrfToken::new_random().secret().to_string()
}

fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
