//! Run configuration
//!
//! Everything a run needs, loadable from a YAML profile so repeated calls
//! against the same API don't have to repeat every flag:
//!
//! ```yaml
//! page_param: page
//! data_key: data
//! count_key: meta.total
//! headers:
//!   Authorization: Bearer abc123
//! timeout_secs: 30
//! rate_limit: 10
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PaginationConfig;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Profile
// ============================================================================

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnpageConfig {
    /// Page number query parameter; empty disables numeric paging
    pub page_param: String,

    /// Dotted path to the entry array
    pub data_key: Option<String>,

    /// Dotted path to the next page link
    pub next_key: Option<String>,

    /// Dotted path to the last page link
    pub last_key: Option<String>,

    /// Dotted path to the total entry count
    pub count_key: Option<String>,

    /// Extra request headers
    pub headers: StringMap,

    /// Deadline for the whole run, in seconds
    pub timeout_secs: u64,

    /// Maximum requests per second
    pub rate_limit: Option<u32>,
}

impl Default for UnpageConfig {
    fn default() -> Self {
        Self {
            page_param: default_page_param(),
            data_key: None,
            next_key: None,
            last_key: None,
            count_key: None,
            headers: StringMap::new(),
            timeout_secs: 60,
            rate_limit: None,
        }
    }
}

fn default_page_param() -> String {
    "page".to_string()
}

impl UnpageConfig {
    /// Load a profile from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a profile from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values make sense together
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout must be at least one second"));
        }
        if self.rate_limit == Some(0) {
            return Err(Error::config("rate limit must be at least one request per second"));
        }
        Ok(())
    }

    /// Run deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the pagination descriptor
    pub fn to_pagination(&self) -> PaginationConfig {
        let mut config = PaginationConfig::new().with_page_param(self.page_param.clone());
        if let Some(key) = &self.data_key {
            config = config.with_data_key(key.clone());
        }
        if let Some(key) = &self.next_key {
            config = config.with_next_key(key.clone());
        }
        if let Some(key) = &self.last_key {
            config = config.with_last_key(key.clone());
        }
        if let Some(key) = &self.count_key {
            config = config.with_count_key(key.clone());
        }
        config
    }

    /// Build the HTTP client configuration
    pub fn to_http(&self, dump_traffic: bool) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(self.timeout())
            .headers(self.headers.clone())
            .dump_traffic(dump_traffic);
        if let Some(rps) = self.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        builder.build()
    }
}
