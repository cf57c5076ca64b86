use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::{ConfigError, ENV_PREFIX};
use crate::publisher::payload::Payload;

pub const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum WordPressError {
    #[error("WordPress API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error("Invalid WordPress URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone)]
pub struct WordPressConfig {
    #[serde(rename = "wp_url")]
    pub url: String,
    #[serde(rename = "wp_username")]
    pub username: String,
    #[serde(rename = "wp_app_password")]
    pub app_password: String,
    #[serde(rename = "wp_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

impl WordPressConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<WordPressConfig>()?;
        for (name, value) in [
            ("WP_URL", &config.url),
            ("WP_USERNAME", &config.username),
            ("WP_APP_PASSWORD", &config.app_password),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(format!("{}{}", ENV_PREFIX, name)));
            }
        }
        Ok(config)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WordPressClient {
    endpoint: String,
    username: String,
    app_password: String,
    client: Client,
}

impl WordPressClient {
    pub fn new(config: WordPressConfig) -> Result<Self, WordPressError> {
        let base_url = config.url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(base_url).map_err(|_| WordPressError::InvalidUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WordPressError::InvalidUrl(base_url.to_string()));
        }
        let endpoint = format!("{}{}", base_url, POSTS_PATH);
        log::debug!("posting endpoint -> {}", endpoint);
        log::debug!(
            "wordpress user {} (app password length {})",
            config.username,
            config.app_password.len()
        );
        let client = Client::builder()
            .timeout(Duration::from_secs(
                config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .user_agent(concat!("autopost/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build WordPress HTTP client")?;
        Ok(Self {
            endpoint,
            username: config.username,
            app_password: config.app_password,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, payload: &Payload) -> Result<PublishedPost, WordPressError> {
        log::info!("submitting '{}' to {}", payload.title, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.app_password))
            .json(payload)
            .send()
            .await
            .context("WordPress request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WordPressError::ApiStatus { status, body });
        }

        let body = response.text().await.context("WordPress response body")?;
        let post: PublishedPost =
            serde_json::from_str(&body).context("WordPress response JSON")?;
        Ok(post)
    }
}
