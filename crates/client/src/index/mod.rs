//! Content-index API client.
//!
//! Speaks the remote query protocol: two list reads (paginated images,
//! unpaginated documents) and one point read for a single image. Transport
//! and protocol failures surface as `IndexError` to foreground callers; the
//! point read swallows all failures and reports an absent record.

pub mod error;
pub mod wire;

pub use error::IndexError;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use medley_core::CatalogConfig;
use medley_core::model::{DocumentRecord, ImageRecord};

use wire::{GET_IMAGE_QUERY, GetImageData, LIST_DOCUMENTS_QUERY, LIST_IMAGES_QUERY, ListDocumentsData, ListImagesData, QueryResponse};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default page size for the image listing.
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "medley/0.1";

/// One page of raw image records plus the continuation cursor.
#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    pub items: Vec<ImageRecord>,
    pub next_token: Option<String>,
}

/// Read operations the catalog needs from the remote index.
///
/// The production implementation is `IndexClient`; tests substitute scripted
/// sources.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// List one page of image records starting at `cursor`.
    async fn list_images(&self, cursor: Option<String>) -> Result<ImageBatch, IndexError>;

    /// List the full document record set.
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, IndexError>;

    /// Point read of a single image record. All failures are reported as an
    /// absent record.
    async fn image_by_id(&self, image_id: &str) -> Option<ImageRecord>;
}

/// Index client configuration.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Query endpoint URL.
    pub endpoint: String,
    /// API key sent in the x-api-key header.
    pub api_key: String,
    /// Page size for the image listing (default 50).
    pub page_size: u32,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl IndexConfig {
    /// Build from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NotConfigured` when the endpoint or API key is
    /// absent.
    pub fn from_catalog(config: &CatalogConfig) -> Result<Self, IndexError> {
        let (endpoint, api_key) = config.require_index().map_err(|_| IndexError::NotConfigured)?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            page_size: config.page_size,
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Content-index API client.
#[derive(Debug, Clone)]
pub struct IndexClient {
    http: reqwest::Client,
    config: IndexConfig,
}

impl IndexClient {
    /// Create a new index client with the given configuration.
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        if config.endpoint.is_empty() || config.api_key.is_empty() {
            return Err(IndexError::NotConfigured);
        }

        url::Url::parse(&config.endpoint).map_err(|e| IndexError::InvalidEndpoint(e.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(IndexError::from)?;

        Ok(Self { http, config })
    }

    /// POST one query and decode its typed payload.
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T, IndexError> {
        let start = Instant::now();

        let http_response = self
            .http
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(IndexError::from)?;

        let status = http_response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(IndexError::Http { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await.map_err(IndexError::from)?;
        let envelope: QueryResponse<T> =
            serde_json::from_slice(&bytes).map_err(|e| IndexError::Parse(e.to_string()))?;

        if let Some(err) = envelope.errors.first() {
            let message = if err.message.is_empty() { "query failed".to_string() } else { err.message.clone() };
            return Err(IndexError::Query(message));
        }

        let data = envelope
            .data
            .ok_or_else(|| IndexError::Parse("response carries no data".to_string()))?;

        tracing::debug!("index query completed in {:?}", start.elapsed());
        Ok(data)
    }
}

#[async_trait]
impl MediaSource for IndexClient {
    async fn list_images(&self, cursor: Option<String>) -> Result<ImageBatch, IndexError> {
        let data: ListImagesData = self
            .query(
                LIST_IMAGES_QUERY,
                serde_json::json!({ "limit": self.config.page_size, "nextToken": cursor }),
            )
            .await?;

        Ok(ImageBatch { items: data.list_images.items, next_token: data.list_images.next_token })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, IndexError> {
        let data: ListDocumentsData = self.query(LIST_DOCUMENTS_QUERY, serde_json::json!({})).await?;
        Ok(data.list_documents.items)
    }

    async fn image_by_id(&self, image_id: &str) -> Option<ImageRecord> {
        match self
            .query::<GetImageData>(GET_IMAGE_QUERY, serde_json::json!({ "imageId": image_id }))
            .await
        {
            Ok(data) => data.get_image,
            Err(e) => {
                tracing::debug!("image lookup failed for {image_id}: {e}");
                None
            }
        }
    }
}
