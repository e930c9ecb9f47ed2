//! Pagination module
//!
//! Supports: Link header, body next/last links, total count
//!
//! # Overview
//!
//! The first page decides how the rest of a result set is retrieved.
//! [`resolve_mode`] inspects it and picks exactly one [`PageMode`]:
//!
//! - **Count** and **LastLink** know the page total up front, so the
//!   remaining pages are fetched in parallel by [`ConcurrentFetcher`]
//! - **NextChain** only knows the next page, so [`SequentialFollower`]
//!   walks the chain one request at a time
//! - **SinglePage** needs no further requests

mod link_header;
mod resolver;
mod strategies;
mod types;

pub use link_header::parse_link_header;
pub use resolver::{last_page_number, page_links, resolve_mode};
pub use strategies::{ConcurrentFetcher, SequentialFollower, MAX_CONCURRENT_REQUESTS};
pub use types::{Collected, Links, PageMode, PaginationConfig};
