//! Document list classification.
//!
//! Partitions the flat document list into the videos and documents views and
//! owns the eligibility pre-filter applied to every fetched list before it
//! is cached.

use regex::Regex;

use medley_core::model::{DocumentRecord, MediaCategory, MediaPage};

use super::normalize::{document_to_media_item, sort_by_date};

/// Dated system letters: `YYYY-MM-DD` at the start of the filename, an
/// optional separator plus free text, and an `.md`/`.pdf` extension.
const LETTER_FILE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}(?:[_\-.].+)?\.(?:md|pdf)$";

/// Filename extensions treated as video when no media-type tag is present.
const VIDEO_EXT_PATTERN: &str = r"(?i)\.(?:mp4|webm|mov|avi|mkv)$";

/// Keep only records eligible for display: indexed, and not system-generated
/// dated letters.
pub fn prefilter(records: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
    let letter = Regex::new(LETTER_FILE_PATTERN).unwrap();

    records
        .into_iter()
        .filter(|d| d.status == "INDEXED" && !letter.is_match(&d.filename))
        .collect()
}

/// Whether a record belongs to the videos view.
///
/// The extension fallback exists because not all ingested records carry
/// reliable media-type tags.
fn is_video(doc: &DocumentRecord, video_ext: &Regex) -> bool {
    (doc.doc_type == "media" && doc.media_type.as_deref() == Some("video")) || video_ext.is_match(&doc.filename)
}

/// Compute the videos view over a raw document list.
pub fn build_videos_page(records: &[DocumentRecord]) -> MediaPage {
    let video_ext = Regex::new(VIDEO_EXT_PATTERN).unwrap();

    let items = records
        .iter()
        .filter(|d| is_video(d, &video_ext))
        .map(|d| document_to_media_item(d, MediaCategory::Videos))
        .collect();

    MediaPage { items: sort_by_date(items), has_more: false }
}

/// Compute the documents view over a raw document list.
///
/// Mutual exclusivity with the videos view comes from the negative filter on
/// the video extension set, not from a third classification pass.
pub fn build_documents_page(records: &[DocumentRecord]) -> MediaPage {
    let video_ext = Regex::new(VIDEO_EXT_PATTERN).unwrap();

    let items = records
        .iter()
        .filter(|d| {
            d.doc_type == "document"
                && d.media_type.as_deref().unwrap_or("").is_empty()
                && !video_ext.is_match(&d.filename)
        })
        .map(|d| document_to_media_item(d, MediaCategory::Documents))
        .collect();

    MediaPage { items: sort_by_date(items), has_more: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, filename: &str, doc_type: &str, media_type: Option<&str>, status: &str) -> DocumentRecord {
        DocumentRecord {
            document_id: id.to_string(),
            filename: filename.to_string(),
            doc_type: doc_type.to_string(),
            media_type: media_type.map(str::to_string),
            input_s3_uri: format!("s3://bucket/uploads/{filename}"),
            preview_url: None,
            status: status.to_string(),
            created_at: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_prefilter_drops_unindexed() {
        let records = vec![
            doc("doc-1", "report.pdf", "document", None, "INDEXED"),
            doc("doc-2", "pending.pdf", "document", None, "PROCESSING"),
        ];

        let kept = prefilter(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].document_id, "doc-1");
    }

    #[test]
    fn test_prefilter_excludes_dated_letters() {
        let records = vec![
            doc("doc-1", "2024-01-15_notes.md", "document", None, "INDEXED"),
            doc("doc-2", "2024-01-15-report-final.pdf", "document", None, "INDEXED"),
            doc("doc-3", "2024-01-15.pdf", "document", None, "INDEXED"),
            doc("doc-4", "report-2024-01-15.pdf", "document", None, "INDEXED"),
        ];

        let kept = prefilter(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].filename, "report-2024-01-15.pdf");
    }

    #[test]
    fn test_untagged_mp4_classified_as_video() {
        let records = vec![doc("doc-1", "holiday.mp4", "document", None, "INDEXED")];

        assert_eq!(build_videos_page(&records).items.len(), 1);
        assert!(build_documents_page(&records).items.is_empty());
    }

    #[test]
    fn test_tagged_video_without_video_extension() {
        let records = vec![doc("doc-1", "stream-capture", "media", Some("video"), "INDEXED")];

        let page = build_videos_page(&records);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].category, MediaCategory::Videos);
        assert!(!page.has_more);
    }

    #[test]
    fn test_video_extension_case_insensitive() {
        let records = vec![doc("doc-1", "CLIP.MKV", "document", None, "INDEXED")];
        assert_eq!(build_videos_page(&records).items.len(), 1);
    }

    #[test]
    fn test_documents_view_excludes_media_typed_records() {
        let records = vec![
            doc("doc-1", "report.pdf", "document", None, "INDEXED"),
            doc("doc-2", "narration", "document", Some("audio"), "INDEXED"),
            doc("doc-3", "talk.mp4", "document", None, "INDEXED"),
        ];

        let page = build_documents_page(&records);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "doc-1");
    }

    #[test]
    fn test_views_sorted_descending() {
        let mut older = doc("doc-1", "a.pdf", "document", None, "INDEXED");
        older.created_at = "2024-01-01T00:00:00Z".to_string();
        let mut newer = doc("doc-2", "b.pdf", "document", None, "INDEXED");
        newer.created_at = "2024-02-01T00:00:00Z".to_string();

        let page = build_documents_page(&[older, newer]);
        let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["doc-2", "doc-1"]);
    }
}
