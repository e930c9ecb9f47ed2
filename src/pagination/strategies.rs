//! Traversal strategy implementations
//!
//! Each strategy takes over after page 1 has been fetched.

use super::resolver::page_links;
use super::types::{Collected, PaginationConfig};
use crate::decode::EntryDecoder;
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::types::Entries;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Upper bound on requests in flight during a concurrent fetch
pub const MAX_CONCURRENT_REQUESTS: usize = 50;

// ============================================================================
// Concurrent Fetch
// ============================================================================

/// Fetches pages `2..=total` in parallel once the page total is known
///
/// Workers hand their entries back to the coordinator together with their
/// page index; the coordinator files each page under its number exactly
/// once. Entries are therefore always returned in page order no matter
/// which request finishes first. Storage grows with finished pages only,
/// never with the page total the server claims.
#[derive(Clone)]
pub struct ConcurrentFetcher {
    source: Arc<dyn PageSource>,
    decoder: EntryDecoder,
    url: Url,
    page_param: String,
    cancel: CancellationToken,
}

impl ConcurrentFetcher {
    /// Create a fetcher for `url`, addressing pages through `page_param`
    pub fn new(
        source: Arc<dyn PageSource>,
        decoder: EntryDecoder,
        url: Url,
        page_param: impl Into<String>,
    ) -> Self {
        Self {
            source,
            decoder,
            url,
            page_param: page_param.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Stop early when `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Fetch the remaining pages and concatenate them after `first`.
    ///
    /// The first failure cancels every other worker and is returned as is;
    /// no partial result is ever produced.
    pub async fn fetch_all(&self, first: Entries, total_pages: u64) -> Result<Collected> {
        let total = usize::try_from(total_pages)
            .map_err(|_| Error::config(format!("page total {total_pages} is too large")))?;
        if total <= 1 {
            return Ok(Collected {
                entries: first,
                pages_fetched: 1,
            });
        }

        let mut fetched: BTreeMap<usize, Entries> = BTreeMap::new();

        let cancel = self.cancel.child_token();
        let mut tasks = JoinSet::new();
        let mut pending = 2..=total;
        let mut first_error: Option<Error> = None;

        loop {
            while first_error.is_none()
                && !cancel.is_cancelled()
                && tasks.len() < MAX_CONCURRENT_REQUESTS
            {
                let Some(page) = pending.next() else {
                    break;
                };
                self.spawn_page(&mut tasks, page, cancel.clone());
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok((page, Ok(entries))) => {
                    debug!("Page {}/{}: {} entries", page, total, entries.len());
                    fetched.insert(page, entries);
                }
                Ok((page, Err(e))) => {
                    if first_error.is_none() {
                        if !e.is_cancellation() {
                            warn!("Page {} failed, cancelling remaining pages: {}", page, e);
                        }
                        cancel.cancel();
                        first_error = Some(e);
                    }
                }
                Err(join_error) => {
                    cancel.cancel();
                    if join_error.is_panic() {
                        std::panic::resume_unwind(join_error.into_panic());
                    }
                    first_error.get_or_insert(Error::Cancelled);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        if fetched.len() != total - 1 {
            return Err(Error::Cancelled);
        }

        let mut entries = first;
        for (_, page) in fetched {
            entries.extend(page);
        }

        Ok(Collected {
            entries,
            pages_fetched: total,
        })
    }

    fn spawn_page(
        &self,
        tasks: &mut JoinSet<(usize, Result<Entries>)>,
        page: usize,
        cancel: CancellationToken,
    ) {
        let source = Arc::clone(&self.source);
        let decoder = self.decoder.clone();
        let url = self.url.clone();
        let query = vec![(self.page_param.clone(), page.to_string())];

        tasks.spawn(async move {
            let result = tokio::select! {
                () = cancel.cancelled() => Err(Error::Cancelled),
                fetched = source.fetch(&url, &query) => {
                    fetched.and_then(|p| decoder.entries(p.body))
                }
            };
            (page, result)
        });
    }
}

impl std::fmt::Debug for ConcurrentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentFetcher")
            .field("url", &self.url.as_str())
            .field("page_param", &self.page_param)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Sequential Follow
// ============================================================================

/// Follows next links one request at a time
///
/// Used when page 1 carries a next link but nothing gives away the page
/// total. Stops when a page has no next link.
#[derive(Clone)]
pub struct SequentialFollower {
    source: Arc<dyn PageSource>,
    decoder: EntryDecoder,
    config: PaginationConfig,
    cancel: CancellationToken,
}

impl SequentialFollower {
    /// Create a follower reading links as described by `config`
    pub fn new(source: Arc<dyn PageSource>, config: PaginationConfig) -> Self {
        Self {
            source,
            decoder: EntryDecoder::with_data_key(config.data_key.clone()),
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop early when `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Fetch from `next` onwards, appending to `first`.
    ///
    /// Any failure discards everything collected so far.
    pub async fn follow(&self, first: Entries, next: Url) -> Result<Collected> {
        let mut entries = first;
        let mut pages_fetched = 1;
        let mut current = Some(next);

        while let Some(url) = current.take() {
            let page = tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                fetched = self.source.fetch(&url, &[]) => fetched?,
            };
            pages_fetched += 1;

            let links = page_links(&page, &self.config)?;
            if let Some(link) = links.next {
                let next = page.resolve(&link)?;
                if next == url {
                    warn!("Next link of {} points back to itself, stopping", url);
                } else {
                    current = Some(next);
                }
            }

            let more = self.decoder.entries(page.body)?;
            debug!("Page {}: {} entries", pages_fetched, more.len());
            entries.extend(more);
        }

        Ok(Collected {
            entries,
            pages_fetched,
        })
    }
}

impl std::fmt::Debug for SequentialFollower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialFollower")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
