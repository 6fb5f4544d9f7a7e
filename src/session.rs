// src/session.rs
use crate::types::{Config, SitedorkError};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client for result pages and redirect resolution.
#[derive(Clone)]
pub struct Session {
    client: Client,
    request_timeout: Duration,
    resolve_timeout: Duration,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, SitedorkError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .redirect(Policy::limited(10))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SitedorkError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Session {
            client,
            request_timeout: config.request_timeout(),
            resolve_timeout: config.resolve_timeout(),
        })
    }

    /// Fetch a results page as text.
    pub async fn get_text(&self, url: &str, accept_language: &str) -> Result<String, SitedorkError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, accept_language)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SitedorkError::NetworkError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// Follow `url` with a HEAD request and return where it ends up.
    pub async fn resolve_redirect(&self, url: &str) -> Result<String, SitedorkError> {
        let response = self
            .client
            .head(url)
            .timeout(self.resolve_timeout)
            .send()
            .await?;

        Ok(response.url().to_string())
    }
}
