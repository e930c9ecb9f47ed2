//! HTTP client module
//!
//! Issues the GET requests for every page of a run.
//!
//! # Features
//!
//! - **Shared Connection Pool**: one `reqwest::Client` cloned into every worker
//! - **Status Validation**: anything but `200 OK` becomes an `HttpStatus` error
//! - **JSON Decoding**: bodies come back as `serde_json::Value` documents
//! - **Rate Limiting**: optional token bucket using governor
//!
//! Nothing here retries. A failed request fails the run.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Page, PageSource};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
