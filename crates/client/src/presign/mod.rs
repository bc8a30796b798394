//! Presigned URL resolution through the authenticated backend proxy.
//!
//! Document originals live in private storage; displaying one requires a
//! time-limited URL minted by the backend. The proxy call needs a bearer
//! credential from the embedding application's auth layer, modeled as the
//! `TokenProvider` seam.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use medley_core::{CatalogConfig, Error};

/// Bearer credential source (external authentication component).
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, or `None` when no session is active.
    fn bearer_token(&self) -> Option<String>;
}

/// Mints time-limited download URLs for storage keys.
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Request a presigned download URL for `key`.
    async fn presigned_url(&self, key: &str) -> Result<String, Error>;
}

/// Extract the storage key from an `s3://bucket/key` URI.
///
/// URIs without the scheme/bucket prefix are passed through unchanged.
pub fn storage_key(s3_uri: &str) -> &str {
    s3_uri
        .strip_prefix("s3://")
        .and_then(|rest| rest.split_once('/'))
        .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
        .map(|(_, key)| key)
        .unwrap_or(s3_uri)
}

/// Proxy response carrying the minted URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresignedUrlResponse {
    download_url: String,
}

/// Signer that proxies through the authenticated backend.
pub struct ProxySigner {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ProxySigner {
    /// Create a signer for the given proxy base URL and bucket identifier.
    pub fn new(
        base_url: impl Into<String>, bucket: impl Into<String>, tokens: Arc<dyn TokenProvider>, timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: base_url.into(), bucket: bucket.into(), tokens })
    }

    /// Build from the application configuration.
    ///
    /// # Errors
    ///
    /// Fails immediately when the proxy base URL is not configured.
    pub fn from_config(config: &CatalogConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, Error> {
        let base_url = config.require_api_base_url()?;
        Self::new(base_url, config.bucket.clone(), tokens, config.timeout())
    }
}

#[async_trait]
impl UrlSigner for ProxySigner {
    /// Mint a presigned URL through the backend proxy.
    ///
    /// The bearer credential is checked before any network I/O.
    async fn presigned_url(&self, key: &str) -> Result<String, Error> {
        let token = self
            .tokens
            .bearer_token()
            .ok_or_else(|| Error::AuthRequired("no active session".to_string()))?;

        let url = format!("{}/download/presigned-url", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("key", key), ("bucket", self.bucket.as_str())])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Http(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("presign request failed: status {}", status.as_u16())));
        }

        let body: PresignedUrlResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("presign response: {e}")))?;

        tracing::debug!("minted presigned URL for key {key}");
        Ok(body.download_url)
    }
}
