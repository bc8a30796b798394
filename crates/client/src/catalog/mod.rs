//! Cached media catalog with stale-while-revalidate reads.
//!
//! The orchestrator serves catalog pages from the in-memory cache whenever
//! one exists, refreshing in the background and notifying the caller only
//! when the refreshed data is materially different. Pictures paginate
//! server-side through an opaque cursor, so "load more" always hits the
//! network; videos and documents are both views over one full-list fetch and
//! share one cache slot, so a UI showing both tabs costs one refresh.

pub mod classify;
pub mod diff;
pub mod normalize;

use std::sync::Arc;

use medley_core::model::{DocumentRecord, ImageRecord, MediaCategory, MediaItem, MediaPage, PictureState};
use medley_core::{CatalogConfig, Error, MediaCache};

use crate::index::{IndexClient, IndexConfig, MediaSource};
use crate::presign::{ProxySigner, TokenProvider, UrlSigner, storage_key};

use classify::{build_documents_page, build_videos_page, prefilter};
use diff::has_new_items;
use normalize::{image_to_media_item, sort_by_date};

pub use normalize::media_item_from_search;

/// Callback invoked when a background refresh produced materially different
/// data than what the caller was already handed.
pub type FreshCallback = Arc<dyn Fn(MediaPage) + Send + Sync>;

/// Options for a catalog read.
#[derive(Clone, Default)]
pub struct GetMediaOptions {
    /// When set, warm reads return immediately and this callback receives
    /// the refreshed page if it differs from the cached one.
    pub on_fresh_data: Option<FreshCallback>,
}

/// Client-side media catalog over the remote content index.
///
/// Holds the process-wide cache; construct once at startup and share. Every
/// instance has fully independent cache state.
pub struct MediaCatalog {
    source: Arc<dyn MediaSource>,
    signer: Arc<dyn UrlSigner>,
    cache: Arc<MediaCache>,
}

/// Compute the requested view over a raw document list.
fn build_view(records: &[DocumentRecord], category: MediaCategory) -> MediaPage {
    match category {
        MediaCategory::Videos => build_videos_page(records),
        _ => build_documents_page(records),
    }
}

impl MediaCatalog {
    /// Create a catalog over explicit source and signer implementations,
    /// with a cold cache.
    pub fn new(source: Arc<dyn MediaSource>, signer: Arc<dyn UrlSigner>) -> Self {
        Self { source, signer, cache: Arc::new(MediaCache::new()) }
    }

    /// Wire up the production index client and backend-proxy signer from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Fails immediately when the index endpoint/key or the proxy base URL
    /// is not configured.
    pub fn from_config(config: &CatalogConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, Error> {
        let source = IndexClient::new(IndexConfig::from_catalog(config)?)?;
        let signer = ProxySigner::from_config(config, tokens)?;
        Ok(Self::new(Arc::new(source), Arc::new(signer)))
    }

    /// Fetch the requested category, serving from cache when possible.
    ///
    /// With a warm cache and an `on_fresh_data` callback, the cached page is
    /// returned without awaiting the network; a detached refresh replaces
    /// the slot and fires the callback only when it finds new or removed
    /// items. Background failures are logged and never surface here. A warm
    /// cache without a callback is treated as a cold read: fetch fresh and
    /// repopulate.
    pub async fn get_media_items(
        &self, category: MediaCategory, load_more: bool, options: GetMediaOptions,
    ) -> Result<MediaPage, Error> {
        match category {
            MediaCategory::Pictures => self.pictures_page(load_more, options).await,
            MediaCategory::Videos | MediaCategory::Documents => self.document_view(category, options).await,
        }
    }

    async fn pictures_page(&self, load_more: bool, options: GetMediaOptions) -> Result<MediaPage, Error> {
        // Load more always hits the network: there is no page 2 cached
        // locally, only the cursor where it starts.
        if load_more && let Some(state) = self.cache.pictures().await {
            let batch = self.source.list_images(state.next_token.clone()).await?;

            let mut items = state.items;
            items.extend(batch.items.iter().map(image_to_media_item));
            let has_more = batch.next_token.is_some();

            self.cache
                .replace_pictures(PictureState { items: items.clone(), next_token: batch.next_token })
                .await;

            return Ok(MediaPage { items: sort_by_date(items), has_more });
        }

        if let Some(state) = self.cache.pictures().await
            && let Some(on_fresh) = options.on_fresh_data
        {
            let page = MediaPage { items: sort_by_date(state.items), has_more: state.next_token.is_some() };
            self.spawn_picture_refresh(on_fresh);
            return Ok(page);
        }

        let batch = self.source.list_images(None).await?;
        let items: Vec<MediaItem> = batch.items.iter().map(image_to_media_item).collect();
        let has_more = batch.next_token.is_some();

        self.cache
            .replace_pictures(PictureState { items: items.clone(), next_token: batch.next_token })
            .await;

        Ok(MediaPage { items: sort_by_date(items), has_more })
    }

    /// Detached page-1 refresh for the pictures slot.
    fn spawn_picture_refresh(&self, on_fresh: FreshCallback) {
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);

        tokio::spawn(async move {
            match source.list_images(None).await {
                Ok(batch) => {
                    let fresh: Vec<MediaItem> = batch.items.iter().map(image_to_media_item).collect();

                    // Compare against the slot as it is now, not as captured
                    // when the refresh was spawned.
                    let current = cache.pictures().await.map(|s| s.items).unwrap_or_default();
                    if has_new_items(&current, &fresh) {
                        let has_more = batch.next_token.is_some();
                        cache
                            .replace_pictures(PictureState { items: fresh.clone(), next_token: batch.next_token })
                            .await;
                        on_fresh(MediaPage { items: sort_by_date(fresh), has_more });
                    }
                }
                Err(e) => tracing::warn!("background picture refresh failed: {e}"),
            }
        });
    }

    async fn document_view(&self, category: MediaCategory, options: GetMediaOptions) -> Result<MediaPage, Error> {
        if let Some(records) = self.cache.documents().await
            && let Some(on_fresh) = options.on_fresh_data
        {
            let page = build_view(&records, category);
            self.spawn_document_refresh(category, on_fresh);
            return Ok(page);
        }

        let records = prefilter(self.source.list_documents().await?);
        self.cache.replace_documents(records.clone()).await;

        Ok(build_view(&records, category))
    }

    /// Detached full-list refresh shared by the videos and documents views.
    fn spawn_document_refresh(&self, category: MediaCategory, on_fresh: FreshCallback) {
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);

        tokio::spawn(async move {
            match source.list_documents().await {
                Ok(records) => {
                    let fresh = prefilter(records);
                    let fresh_page = build_view(&fresh, category);

                    // Recompute the cached view at comparison time; the slot
                    // may have moved since the caller was answered.
                    let cached = cache.documents().await.unwrap_or_default();
                    let cached_page = build_view(&cached, category);

                    if has_new_items(&cached_page.items, &fresh_page.items) {
                        cache.replace_documents(fresh).await;
                        on_fresh(fresh_page);
                    }
                }
                Err(e) => tracing::warn!("background document refresh failed: {e}"),
            }
        });
    }

    /// Clear both cache slots unconditionally (call after uploads).
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate_all().await;
    }

    /// Rewind picture pagination by clearing the pictures slot.
    pub async fn reset_pagination(&self) {
        self.cache.reset_pictures().await;
    }

    /// Resolve a display URL for an item that needs one.
    ///
    /// Items already carrying a usable signed URL are returned as-is without
    /// touching the network. Resolution never writes back into the cache;
    /// signed URLs are short-lived and must not be cached.
    pub async fn resolve_signed_url(&self, item: &MediaItem) -> Result<String, Error> {
        if let Some(url) = item.signed_url.as_deref()
            && !url.is_empty()
        {
            return Ok(url.to_string());
        }

        let records = match self.cache.documents().await {
            Some(records) => records,
            None => prefilter(self.source.list_documents().await?),
        };

        let record = records
            .iter()
            .find(|d| d.document_id == item.id)
            .ok_or_else(|| Error::NotFound(format!("document {} has no backing record", item.id)))?;

        self.signer.presigned_url(storage_key(&record.input_s3_uri)).await
    }

    /// Request a presigned URL for a known storage key.
    pub async fn presigned_url_for_key(&self, key: &str) -> Result<String, Error> {
        self.signer.presigned_url(key).await
    }

    /// Point read of a single image record (for search result thumbnails).
    /// All failures are reported as an absent record.
    pub async fn get_image_by_id(&self, image_id: &str) -> Option<ImageRecord> {
        self.source.image_by_id(image_id).await
    }
}
