// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # unpage
//!
//! Fetch every page of a paginated JSON API and return the combined entries
//! as one array, in page order.
//!
//! ## Features
//!
//! - **Count paging**: total entry count in the body, pages fetched in parallel
//! - **Last-link paging**: last page number from a body key or `Link` header
//! - **Next-link paging**: follow next links one page at a time
//! - **Nested keys**: dotted paths like `meta.pagination.total`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use unpage::{http::HttpClient, PaginationConfig, Result, Unpager};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = PaginationConfig::new()
//!         .with_page_param("page")
//!         .with_data_key("data")
//!         .with_count_key("meta.total");
//!
//!     let unpager = Unpager::new(Arc::new(HttpClient::new()?), config);
//!     let entries = unpager.run(&"https://api.example.com/items".parse()?).await?;
//!     println!("{}", serde_json::to_string(&entries)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Unpager::run(url)                        │
//! │   fetch page 1  →  resolve mode  →  run strategy            │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────┬───────────────────────┐
//! │    HTTP      │     Resolver         │     Strategies        │
//! ├──────────────┼──────────────────────┼───────────────────────┤
//! │ Headers      │ Count key            │ Concurrent (max 50)   │
//! │ Query merge  │ Last link            │ Sequential next links │
//! │ Rate limit   │ Next link            │                       │
//! └──────────────┴──────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// JSON body decoding and nested-key lookup
pub mod decode;

/// HTTP client with rate limiting
pub mod http;

/// Pagination modes and traversal strategies
pub mod pagination;

/// Main execution engine
pub mod engine;

/// Run configuration and YAML profiles
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::UnpageConfig;
pub use engine::{RunStats, Unpager};
pub use error::{Error, Result};
pub use pagination::{PageMode, PaginationConfig};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
