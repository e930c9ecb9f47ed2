//! HTTP client for page retrieval
//!
//! Handles:
//! - Applying the run's headers to every request
//! - Merging page query parameters into the target URL
//! - Rejecting non-200 responses with their body attached
//! - Decoding the body as JSON

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::decode::parse_document;
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Headers applied to every request
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Log full request/response dumps at debug level
    pub dump_traffic: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            default_headers: StringMap::new(),
            user_agent: format!("unpage/{}", crate::VERSION),
            rate_limit: None,
            dump_traffic: false,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add several default headers
    #[must_use]
    pub fn headers(mut self, headers: StringMap) -> Self {
        self.config.default_headers.extend(headers);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set rate limiter
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Enable request/response dumps
    #[must_use]
    pub fn dump_traffic(mut self, enabled: bool) -> Self {
        self.config.dump_traffic = enabled;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// One decoded response
#[derive(Debug, Clone)]
pub struct Page {
    /// Decoded JSON body
    pub body: JsonValue,
    /// Raw `Link` header, if the response carried one
    pub link_header: Option<String>,
    /// Final URL of the response, used to resolve relative links
    pub url: Url,
}

impl Page {
    /// Resolve a possibly relative link against this page's URL
    pub fn resolve(&self, link: &str) -> Result<Url> {
        Ok(self.url.join(link)?)
    }
}

/// Anything that can fetch a page of JSON
///
/// `HttpClient` is the real implementation; the pagination strategies only
/// depend on this trait.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` with `query` merged into its query string
    async fn fetch(&self, url: &Url, query: &[(String, String)]) -> Result<Page>;
}

/// HTTP client shared by every request of a run
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Issue a GET request and decode the JSON body
    pub async fn get_page(&self, url: &Url, query: &[(String, String)]) -> Result<Page> {
        let mut full_url = url.clone();
        merge_query(&mut full_url, query);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(full_url.clone());
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let request = req.build()?;
        if self.config.dump_traffic {
            debug!(
                "Request:\n{} {}\n{}",
                request.method(),
                request.url(),
                format_headers(request.headers())
            );
        }

        debug!("GET {}", full_url);
        let response = self.client.execute(request).await?;
        let status = response.status();
        let final_url = response.url().clone();
        let link_header = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let response_headers = self
            .config
            .dump_traffic
            .then(|| format_headers(response.headers()));

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            if let Some(headers) = response_headers {
                debug!("Response:\n{}\n{}\n{}", status, headers, body);
            }
            return Err(Error::http_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        if let Some(headers) = response_headers {
            debug!(
                "Response:\n{}\n{}\n{}",
                status,
                headers,
                String::from_utf8_lossy(&bytes)
            );
        }

        Ok(Page {
            body: parse_document(&bytes)?,
            link_header,
            url: final_url,
        })
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch(&self, url: &Url, query: &[(String, String)]) -> Result<Page> {
        self.get_page(url, query).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Merge `params` into the URL's query string.
///
/// A parameter already present in the URL is replaced, not duplicated.
pub(crate) fn merge_query(url: &mut Url, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(p, _)| p == k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept.iter().chain(params.iter()));
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join("\n")
}
