//! Client code for medley.
//!
//! This crate provides the remote content-index client, the cached catalog
//! orchestrator with stale-while-revalidate reads, and presigned URL
//! resolution for items that need one.

pub mod catalog;
pub mod index;
pub mod presign;

pub use catalog::{FreshCallback, GetMediaOptions, MediaCatalog, media_item_from_search};

pub use index::{ImageBatch, IndexClient, IndexConfig, IndexError, MediaSource};

pub use presign::{ProxySigner, TokenProvider, UrlSigner, storage_key};
