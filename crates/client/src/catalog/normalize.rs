//! Record normalization.
//!
//! Converts heterogeneous remote records into the uniform `MediaItem` shape
//! and owns content-type inference and presentation ordering.

use chrono::{DateTime, Utc};

use medley_core::model::{DocumentRecord, ImageRecord, MediaCategory, MediaItem};

/// Infer a MIME type from the filename extension.
///
/// Splits on the last `.`, lowercases the extension, and looks it up in a
/// fixed table; unknown or missing extensions fall back to a generic binary
/// type. Same filename always yields the same answer.
pub fn infer_content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Parse a wire timestamp, falling back to the epoch floor.
///
/// Upload dates only drive presentation order; a malformed timestamp must
/// not fail the whole page.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            tracing::warn!("unparseable timestamp {raw:?}: {e}");
            DateTime::<Utc>::MIN_UTC
        })
}

/// Normalize a raw image record into a picture item.
///
/// Pictures are displayed via their thumbnail, so the thumbnail URL doubles
/// as the signed URL when present.
pub fn image_to_media_item(img: &ImageRecord) -> MediaItem {
    MediaItem {
        id: img.image_id.clone(),
        filename: img.filename.clone(),
        title: img.filename.clone(),
        description: img.caption.clone().filter(|c| !c.is_empty()),
        upload_date: parse_timestamp(&img.created_at),
        file_size: img.file_size.unwrap_or(0),
        content_type: img
            .content_type
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| infer_content_type(&img.filename).to_string()),
        thumbnail_url: img.thumbnail_url.clone().filter(|u| !u.is_empty()),
        signed_url: img.thumbnail_url.clone().filter(|u| !u.is_empty()),
        category: MediaCategory::Pictures,
    }
}

/// Normalize a raw document record into a video or document item.
///
/// Document originals require a signed fetch, so the signed URL starts
/// unresolved and the size is unknown.
pub fn document_to_media_item(doc: &DocumentRecord, category: MediaCategory) -> MediaItem {
    MediaItem {
        id: doc.document_id.clone(),
        filename: doc.filename.clone(),
        title: doc.filename.clone(),
        description: None,
        upload_date: parse_timestamp(&doc.created_at),
        file_size: 0,
        content_type: infer_content_type(&doc.filename).to_string(),
        thumbnail_url: None,
        signed_url: None,
        category,
    }
}

/// Sort items newest first.
///
/// Stable with respect to equal timestamps (original relative order is
/// preserved for ties) and idempotent.
pub fn sort_by_date(mut items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
    items
}

/// Build a display-ready item for media surfaced outside the normal catalog
/// (e.g. search results), stamped with the current time.
///
/// Never touches the cache. The storage key stays with the caller for later
/// signing; the item itself carries no storage reference.
pub fn media_item_from_search(
    id: &str, filename: &str, _s3_key: &str, category: MediaCategory, description: Option<String>,
) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        filename: filename.to_string(),
        title: filename.to_string(),
        description,
        upload_date: Utc::now(),
        file_size: 0,
        content_type: infer_content_type(filename).to_string(),
        thumbnail_url: None,
        signed_url: None,
        category,
    }
}
