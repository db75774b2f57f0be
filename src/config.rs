//! Client configuration
//!
//! Controls where playlist pages are fetched from and how requests look.
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! ```yaml
//! base_url: https://www.youtube.com
//! timeout_seconds: 30
//! client_version: "2.20200720.00.02"
//! headers:
//!   User-Agent: Mozilla/5.0
//!   accept-language: en-US,en
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Web client version sent with continuation requests
pub const DEFAULT_CLIENT_VERSION: &str = "2.20200720.00.02";

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration, loadable from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site root used for playlist pages and the browse endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Headers sent with every request
    #[serde(default = "default_headers")]
    pub headers: StringMap,

    /// `clientVersion` sent with continuation requests
    #[serde(default = "default_client_version")]
    pub client_version: String,

    /// Optional client-side rate limiting
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            headers: default_headers(),
            client_version: default_client_version(),
            rate_limit: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_client_version() -> String {
    DEFAULT_CLIENT_VERSION.to_string()
}

/// Headers the site expects from a browser-like client
pub fn default_headers() -> StringMap {
    let mut headers = StringMap::new();
    headers.insert("User-Agent".to_string(), "Mozilla/5.0".to_string());
    headers.insert("accept-language".to_string(), "en-US,en".to_string());
    headers
}

impl ClientConfig {
    /// Load a config from a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        url::Url::parse(&self.base_url)?;

        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }

        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Build the HTTP client configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()).build(),
            None => builder.no_rate_limit().build(),
        }
    }
}
