//! Unified error types for medley.

/// Unified error type for catalog operations.
///
/// Foreground fetches surface these to the caller; background refreshes log
/// and discard them. Nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote index endpoint or credential is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// No authenticated session where one is required.
    #[error("not authenticated: {0}")]
    AuthRequired(String),

    /// Transport failure: non-success status or network error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Error reported by the remote query protocol.
    #[error("query error: {0}")]
    Query(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Referenced item has no backing record.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::NotConfigured(err.to_string())
    }
}
