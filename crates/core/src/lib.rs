//! Core types and shared functionality for medley.
//!
//! This crate provides:
//! - The uniform media data model and raw index records
//! - In-memory media cache with slot-level invalidation
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::MediaCache;
pub use config::{CatalogConfig, ConfigError};
pub use error::Error;
pub use model::{DocumentRecord, ImageRecord, MediaCategory, MediaItem, MediaPage, PictureState};
