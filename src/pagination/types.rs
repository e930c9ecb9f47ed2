//! Pagination types
//!
//! Defines the pagination descriptor and the resolved traversal modes.

use crate::types::Entries;
use std::fmt;
use url::Url;

/// Which keys describe pagination for a given API
///
/// Every key is optional; empty strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Query parameter carrying the page number (e.g., "page")
    pub page_param: Option<String>,
    /// Dotted path to the entry array in each body
    pub data_key: Option<String>,
    /// Dotted path to the next page link in the body
    pub next_key: Option<String>,
    /// Dotted path to the last page link in the body
    pub last_key: Option<String>,
    /// Dotted path to the total entry count in the body
    pub count_key: Option<String>,
}

impl PaginationConfig {
    /// Create an empty config (whole body is the entry array, Link header paging)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number query parameter
    #[must_use]
    pub fn with_page_param(mut self, param: impl Into<String>) -> Self {
        self.page_param = non_empty(param.into());
        self
    }

    /// Set the data key
    #[must_use]
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = non_empty(key.into());
        self
    }

    /// Set the next link key
    #[must_use]
    pub fn with_next_key(mut self, key: impl Into<String>) -> Self {
        self.next_key = non_empty(key.into());
        self
    }

    /// Set the last link key
    #[must_use]
    pub fn with_last_key(mut self, key: impl Into<String>) -> Self {
        self.last_key = non_empty(key.into());
        self
    }

    /// Set the total count key
    #[must_use]
    pub fn with_count_key(mut self, key: impl Into<String>) -> Self {
        self.count_key = non_empty(key.into());
        self
    }

    /// True when links are read from the body instead of the Link header
    pub fn uses_body_links(&self) -> bool {
        self.next_key.is_some() || self.last_key.is_some()
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Next/last links found on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    /// Link to the following page
    pub next: Option<String>,
    /// Link to the final page
    pub last: Option<String>,
}

/// The traversal strategy chosen for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    /// Page 1 is the whole result
    SinglePage,
    /// Page total derived from a total entry count
    Count {
        /// Number of pages including page 1
        total_pages: u64,
    },
    /// Page total read from the last page link
    LastLink {
        /// Number of pages including page 1
        total_pages: u64,
    },
    /// Follow next links until they run out
    NextChain {
        /// Absolute URL of page 2
        next: Url,
    },
}

impl fmt::Display for PageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePage => write!(f, "single page"),
            Self::Count { total_pages } => write!(f, "count ({total_pages} pages)"),
            Self::LastLink { total_pages } => write!(f, "last link ({total_pages} pages)"),
            Self::NextChain { next } => write!(f, "next chain (from {next})"),
        }
    }
}

/// Entries gathered by a traversal strategy
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// All entries in page order
    pub entries: Entries,
    /// Number of pages that contributed, page 1 included
    pub pages_fetched: usize,
}
