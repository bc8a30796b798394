//! Uniform media data model.
//!
//! Heterogeneous remote records (image and document rows from the content
//! index) are normalized into one `MediaItem` shape for display. The raw
//! record types live here as well so the cache can hold them between
//! refreshes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media category served by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Pictures,
    Videos,
    Documents,
}

impl MediaCategory {
    /// Category name as used in logs and serialized payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Pictures => "pictures",
            MediaCategory::Videos => "videos",
            MediaCategory::Documents => "documents",
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform display record for one piece of media.
///
/// `signed_url` carries a non-empty value only when the item can be shown
/// without further resolution. `category` is fixed at creation and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub description: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub file_size: u64,
    pub content_type: String,
    pub thumbnail_url: Option<String>,
    pub signed_url: Option<String>,
    pub category: MediaCategory,
}

/// One page of catalog results, ordered newest first.
///
/// `has_more` is meaningful only for the pictures category, the only
/// paginated source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    pub has_more: bool,
}

/// Raw image record as returned by the content index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub image_id: String,
    pub filename: String,
    pub s3_uri: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub created_at: String,
}

/// Raw document record as returned by the content index.
///
/// The videos and documents categories are both views computed over a list
/// of these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub document_id: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub media_type: Option<String>,
    pub input_s3_uri: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Contents of the pictures cache slot: items accumulated across pages plus
/// the cursor where the next page starts. A `None` token means the source is
/// exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureState {
    pub items: Vec<MediaItem>,
    pub next_token: Option<String>,
}
