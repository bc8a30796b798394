//! Content-index client error types.

use std::sync::Arc;

/// Errors from the content-index protocol client.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Endpoint URL or API key not set.
    #[error("index not configured: endpoint or API key not set")]
    NotConfigured,

    /// Endpoint URL could not be parsed.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Error reported inside the query response.
    #[error("query error: {0}")]
    Query(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { IndexError::Timeout } else { IndexError::Network(Arc::new(err)) }
    }
}

impl From<IndexError> for medley_core::Error {
    fn from(err: IndexError) -> Self {
        use medley_core::Error;

        match &err {
            IndexError::NotConfigured | IndexError::InvalidEndpoint(_) => Error::NotConfigured(err.to_string()),
            IndexError::Query(msg) => Error::Query(msg.clone()),
            IndexError::Parse(msg) => Error::Parse(msg.clone()),
            IndexError::Http { .. } | IndexError::Timeout | IndexError::Network(_) => Error::Http(err.to_string()),
        }
    }
}
