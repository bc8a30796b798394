//! Configuration validation rules.
//!
//! This module provides validation logic for `CatalogConfig` values
//! after they have been loaded from environment, files, or defaults.

use thiserror::Error;

use crate::config::CatalogConfig;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl CatalogConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `page_size` is 0 or exceeds 200
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `bucket` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid { field: "page_size".into(), reason: "must be greater than 0".into() });
        }
        if self.page_size > 200 {
            return Err(ConfigError::Invalid { field: "page_size".into(), reason: "must not exceed 200".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.bucket.is_empty() {
            return Err(ConfigError::Invalid { field: "bucket".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
