//! Catalog metadata API client
//!
//! Fetches title metadata and per-season episode lists from the metadata
//! backend. Both endpoints wrap their payload in the `{ success, data }`
//! envelope; a non-success envelope reads as not-found. Failed fetches are
//! reported once and never retried.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;
use crate::models::{ApiResponse, Episode, MediaType, TitleMetadata};

/// Metadata API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/connection error
    #[error("network error: {0}")]
    Network(String),
    /// HTTP error (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Malformed response body
    #[error("parse error: {0}")]
    Parse(String),
    /// Backend reported no such resource (`success: false` or missing data)
    #[error("resource not found")]
    NotFound,
}

/// Source of title metadata and episode lists.
///
/// Implemented by [`MetadataClient`] for the real backend; controllers take
/// the source as a type parameter so tests can substitute a stub.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn fetch_title(&self, media_type: MediaType, id: &str)
        -> Result<TitleMetadata, ApiError>;

    async fn fetch_episodes(&self, id: &str, season: u32) -> Result<Vec<Episode>, ApiError>;
}

/// HTTP client for the metadata backend
pub struct MetadataClient {
    http: Client,
    api_base: String,
}

impl MetadataClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.fetch_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request and unwrap the response envelope
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("metadata request: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            error!("failed to parse metadata response: {}", e);
            debug!("response text: {}", text.chars().take(500).collect::<String>());
            ApiError::Parse(e.to_string())
        })?;

        unwrap_envelope(envelope)
    }
}

impl MetadataSource for MetadataClient {
    async fn fetch_title(
        &self,
        media_type: MediaType,
        id: &str,
    ) -> Result<TitleMetadata, ApiError> {
        let url = format!(
            "{}/{}/{}",
            self.api_base,
            media_type,
            urlencoding::encode(id)
        );
        self.get(&url).await
    }

    async fn fetch_episodes(&self, id: &str, season: u32) -> Result<Vec<Episode>, ApiError> {
        let url = format!(
            "{}/episodes/{}?s={}",
            self.api_base,
            urlencoding::encode(id),
            season
        );
        self.get(&url).await
    }
}

/// Turn a response envelope into its payload; non-success or missing data is
/// a [`ApiError::NotFound`]
fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(ApiError::NotFound);
    }
    envelope.data.ok_or(ApiError::NotFound)
}
