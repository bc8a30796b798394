//! Wire envelopes for the content-index query protocol.
//!
//! Every read is a POST of `{ query, variables }`; responses carry either a
//! `data` payload or a list of protocol errors.

use medley_core::model::{DocumentRecord, ImageRecord};
use serde::Deserialize;

/// Query text for the paginated image listing.
pub const LIST_IMAGES_QUERY: &str = "query ListImages($limit: Int, $nextToken: String) {
  listImages(limit: $limit, nextToken: $nextToken) {
    items { imageId filename s3Uri thumbnailUrl caption contentType fileSize createdAt }
    nextToken
  }
}";

/// Query text for the full document listing.
pub const LIST_DOCUMENTS_QUERY: &str = "query {
  listDocuments {
    items { documentId filename type mediaType inputS3Uri previewUrl status createdAt }
  }
}";

/// Query text for the single-image point read.
pub const GET_IMAGE_QUERY: &str = "query GetImage($imageId: ID!) {
  getImage(imageId: $imageId) {
    imageId filename s3Uri thumbnailUrl caption contentType fileSize createdAt
  }
}";

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct QueryResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<QueryError>,
}

/// One protocol-reported error.
#[derive(Debug, Deserialize)]
pub struct QueryError {
    #[serde(default)]
    pub message: String,
}

/// Payload of `listImages`.
#[derive(Debug, Deserialize)]
pub struct ListImagesData {
    #[serde(rename = "listImages")]
    pub list_images: ImageConnection,
}

/// Image items plus continuation cursor.
#[derive(Debug, Deserialize)]
pub struct ImageConnection {
    #[serde(default)]
    pub items: Vec<ImageRecord>,
    #[serde(default, rename = "nextToken")]
    pub next_token: Option<String>,
}

/// Payload of `listDocuments`.
#[derive(Debug, Deserialize)]
pub struct ListDocumentsData {
    #[serde(rename = "listDocuments")]
    pub list_documents: DocumentConnection,
}

/// Full document item set (unpaginated).
#[derive(Debug, Deserialize)]
pub struct DocumentConnection {
    #[serde(default)]
    pub items: Vec<DocumentRecord>,
}

/// Payload of `getImage`.
#[derive(Debug, Deserialize)]
pub struct GetImageData {
    #[serde(rename = "getImage", default)]
    pub get_image: Option<ImageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_list_images_envelope() {
        let json = r#"{
            "data": {
                "listImages": {
                    "items": [
                        {
                            "imageId": "img-1",
                            "filename": "photo.jpg",
                            "s3Uri": "s3://bucket/photos/photo.jpg",
                            "thumbnailUrl": "https://cdn.example.com/thumb.jpg",
                            "fileSize": 1024,
                            "createdAt": "2024-03-01T10:00:00Z"
                        }
                    ],
                    "nextToken": "cursor-2"
                }
            }
        }"#;

        let envelope: QueryResponse<ListImagesData> = serde_json::from_str(json).unwrap();
        assert!(envelope.errors.is_empty());

        let data = envelope.data.unwrap();
        assert_eq!(data.list_images.items.len(), 1);
        assert_eq!(data.list_images.items[0].image_id, "img-1");
        assert_eq!(data.list_images.next_token.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn test_deserialize_exhausted_cursor() {
        let json = r#"{"data": {"listImages": {"items": [], "nextToken": null}}}"#;
        let envelope: QueryResponse<ListImagesData> = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert!(data.list_images.items.is_empty());
        assert!(data.list_images.next_token.is_none());
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"data": null, "errors": [{"message": "unauthorized"}]}"#;
        let envelope: QueryResponse<ListImagesData> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "unauthorized");
    }

    #[test]
    fn test_deserialize_get_image_absent() {
        let json = r#"{"data": {"getImage": null}}"#;
        let envelope: QueryResponse<GetImageData> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.unwrap().get_image.is_none());
    }
}
