use crate::error::ConfigError;
use crate::models::oauth::Credentials;
use crate::twitter::TwitterClient;
use std::path::PathBuf;
use url::Url;

const DEFAULT_CALLBACK_URL: &str = "http://127.0.0.1:8000/verify";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_API_BASE: &str = "https://api.twitter.com/";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub consumer: Credentials,
    pub callback_url: String,
    pub bind_addr: String,
    pub api_base: Url,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        let consumer_key = required("TSSM_CONSUMER_KEY")?;
        let consumer_secret = required("TSSM_CONSUMER_SECRET")?;

        let callback_url =
            env::var("TSSM_CALLBACK_URL").unwrap_or_else(|_| DEFAULT_CALLBACK_URL.to_string());
        let bind_addr =
            env::var("TSSM_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let api_base = env::var("TSSM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let static_dir =
            env::var("TSSM_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            consumer: Credentials::new(consumer_key, consumer_secret),
            callback_url,
            bind_addr,
            api_base: parse_api_base(&api_base)?,
            static_dir: PathBuf::from(static_dir),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parses the provider base URL. Endpoint paths are joined onto it, so it
/// must end with a slash.
pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
        name: "TSSM_API_BASE",
        source,
    })
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub twitter: TwitterClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let twitter = TwitterClient::new(
            reqwest::Client::new(),
            config.api_base.clone(),
            config.consumer.clone(),
            config.callback_url.clone(),
        );

        Self { config, twitter }
    }
}
