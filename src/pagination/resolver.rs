//! Pagination mode resolution
//!
//! Looks at page 1 and decides how the remaining pages are retrieved.
//! Resolution order is fixed: count, then last link, then next link.
//! Signals that give the page total up front win because they allow the
//! remaining pages to be fetched in parallel.

use super::link_header::parse_link_header;
use super::types::{Links, PageMode, PaginationConfig};
use crate::decode::{lookup_count, lookup_link};
use crate::error::{Error, Result};
use crate::http::Page;
use tracing::debug;
use url::Url;

/// Pick the traversal mode for a run from its first page.
///
/// `page_size` is the number of entries page 1 carried.
pub fn resolve_mode(page: &Page, page_size: usize, config: &PaginationConfig) -> Result<PageMode> {
    // Without a page parameter there is no way to address page N directly
    let page_param = config.page_param.as_deref();

    if page_param.is_some() {
        if let Some(mode) = count_mode(page, page_size, config)? {
            return Ok(mode);
        }
    }

    let links = page_links(page, config)?;

    if let (Some(page_param), Some(last)) = (page_param, links.last.as_deref()) {
        let last_url = page.resolve(last)?;
        let total_pages = last_page_number(&last_url, page_param)
            .ok_or_else(|| Error::invalid_last_link(last_url.as_str(), page_param))?;
        if total_pages <= 1 {
            return Ok(PageMode::SinglePage);
        }
        return Ok(PageMode::LastLink { total_pages });
    }

    next_mode(page, links.next)
}

fn count_mode(
    page: &Page,
    page_size: usize,
    config: &PaginationConfig,
) -> Result<Option<PageMode>> {
    let Some(count_key) = config.count_key.as_deref() else {
        return Ok(None);
    };
    let Some(count) = lookup_count(&page.body, count_key)? else {
        debug!("Count key '{}' not present on first page", count_key);
        return Ok(None);
    };

    let page_size = page_size as u64;
    if page_size == 0 || count <= page_size {
        return Ok(Some(PageMode::SinglePage));
    }

    Ok(Some(PageMode::Count {
        total_pages: count.div_ceil(page_size),
    }))
}

fn next_mode(page: &Page, next: Option<String>) -> Result<PageMode> {
    match next {
        Some(next) => Ok(PageMode::NextChain {
            next: page.resolve(&next)?,
        }),
        None => Ok(PageMode::SinglePage),
    }
}

/// Read the next/last links of a page.
///
/// When a body key is configured the body is the only source; otherwise
/// both links come from the Link header.
pub fn page_links(page: &Page, config: &PaginationConfig) -> Result<Links> {
    if !config.uses_body_links() {
        return Ok(page
            .link_header
            .as_deref()
            .map(parse_link_header)
            .unwrap_or_default());
    }

    let next = match config.next_key.as_deref() {
        Some(key) => lookup_link(&page.body, key)?,
        None => None,
    };
    let last = match config.last_key.as_deref() {
        Some(key) => lookup_link(&page.body, key)?,
        None => None,
    };

    Ok(Links { next, last })
}

/// Page number carried by a link's `page_param` query value
pub fn last_page_number(url: &Url, page_param: &str) -> Option<u64> {
    url.query_pairs()
        .find(|(k, _)| k == page_param)
        .and_then(|(_, v)| v.trim().parse().ok())
}
