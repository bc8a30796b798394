//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MEDLEY_*)
//! 2. TOML config file (if MEDLEY_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Catalog configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MEDLEY_*)
/// 2. TOML config file (if MEDLEY_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Content-index query endpoint URL.
    ///
    /// Set via MEDLEY_INDEX_URL environment variable.
    /// Required for any catalog fetch.
    #[serde(default)]
    pub index_url: Option<String>,

    /// API key sent with every index query.
    ///
    /// Set via MEDLEY_INDEX_API_KEY environment variable.
    #[serde(default)]
    pub index_api_key: Option<String>,

    /// Base URL of the authenticated backend proxy used for presigned URLs.
    ///
    /// Set via MEDLEY_API_BASE_URL environment variable.
    /// Required only when a signed URL is resolved.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Bucket identifier passed to the presign proxy.
    ///
    /// Set via MEDLEY_BUCKET environment variable.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Page size for the paginated picture listing.
    ///
    /// Set via MEDLEY_PAGE_SIZE environment variable.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MEDLEY_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MEDLEY_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_bucket() -> String {
    "media".into()
}

fn default_page_size() -> u32 {
    50
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "medley/0.1".into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index_url: None,
            index_api_key: None,
            api_base_url: None,
            bucket: default_bucket(),
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MEDLEY_`
    /// 2. TOML file from `MEDLEY_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MEDLEY_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MEDLEY_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that the index endpoint and API key are available (for deferred
    /// validation at client construction).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the absent field.
    pub fn require_index(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .index_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "index_url".into(),
                hint: "Set MEDLEY_INDEX_URL environment variable".into(),
            })?;
        let key = self
            .index_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "index_api_key".into(),
                hint: "Set MEDLEY_INDEX_API_KEY environment variable".into(),
            })?;
        Ok((url, key))
    }

    /// Check that the presign proxy base URL is available.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the base URL is not set.
    pub fn require_api_base_url(&self) -> Result<&str, ConfigError> {
        self.api_base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "api_base_url".into(),
                hint: "Set MEDLEY_API_BASE_URL environment variable".into(),
            })
    }
}
