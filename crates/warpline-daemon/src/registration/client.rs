//! HTTP client for the Cloudflare WARP registration API.
//!
//! Uses reqwest to `POST` a public key and decode the returned account.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::{debug, warn};
use warpline_core::config::RegistrationConfig;

use super::RegistrationClient;
use super::types::{RegisterRequest, Registration};
use crate::clock::now_iso8601;

/// `CF-Client-Version`, lowercased as `HeaderName` requires for static names.
const CLIENT_VERSION_HEADER: &str = "cf-client-version";

/// Registration client errors.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registration API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid registration response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Registration API client.
#[derive(Debug)]
pub struct CloudflareClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
}

impl CloudflareClient {
    /// Create a new registration client.
    pub fn new(config: &RegistrationConfig) -> Result<Self, RegistrationError> {
        if config.base_url.is_empty() {
            return Err(RegistrationError::Config("base_url is empty".into()));
        }
        if config.api_version.is_empty() {
            return Err(RegistrationError::Config("api_version is empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| RegistrationError::Config("Invalid user_agent".into()))?,
        );
        headers.insert(
            CLIENT_VERSION_HEADER,
            HeaderValue::from_str(&config.client_version)
                .map_err(|_| RegistrationError::Config("Invalid client_version".into()))?,
        );

        // reqwest is built with rustls-no-provider; installing twice is harmless.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
        })
    }

    /// Full URL of the registration endpoint.
    pub(crate) fn register_url(&self) -> String {
        format!("{}/{}/reg", self.base_url, self.api_version)
    }

    /// Decode and validate a successful response body.
    pub(crate) fn decode_registration(body: &str) -> Result<Registration, RegistrationError> {
        let registration: Registration = serde_json::from_str(body)
            .map_err(|e| RegistrationError::InvalidResponse(e.to_string()))?;
        registration.validate()?;
        Ok(registration)
    }
}

#[async_trait]
impl RegistrationClient for CloudflareClient {
    async fn register(&self, public_key: &str) -> Result<Registration, RegistrationError> {
        let url = self.register_url();
        let request = RegisterRequest::new(public_key, now_iso8601());

        debug!(url = %url, "Sending registration request");
        let resp = self.http.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            warn!(status = status.as_u16(), "Registration API returned error");
            return Err(RegistrationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let registration = Self::decode_registration(&body)?;
        debug!(account_id = %registration.id, "Registration accepted");
        Ok(registration)
    }
}
