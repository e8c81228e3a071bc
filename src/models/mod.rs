pub mod app_config;
pub mod oauth;
pub mod saved_search;
pub mod user;

pub use app_config::{AppConfig, AppState};
