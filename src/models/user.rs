use serde::Deserialize;

/// Subset of `1.1/account/verify_credentials.json` shown on the profile page.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
}
