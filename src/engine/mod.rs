//! Execution engine module
//!
//! Retrieves a complete result set in one call.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Unpager` - fetches page 1, resolves the pagination mode and hands the
//!   rest of the run to the matching strategy
//! - `RunStats` - what a run did (mode, pages, entries, duration)

mod types;

pub use types::RunStats;

use crate::decode::EntryDecoder;
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::pagination::{
    resolve_mode, Collected, ConcurrentFetcher, PageMode, PaginationConfig, SequentialFollower,
};
use crate::types::Entries;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Fetches every page of a paginated JSON API
pub struct Unpager {
    /// Page source (the HTTP client outside of tests)
    source: Arc<dyn PageSource>,
    /// Pagination descriptor
    config: PaginationConfig,
    /// Cancelled from outside to abort the run
    cancel: CancellationToken,
    /// Deadline for the whole run
    timeout: Option<Duration>,
}

impl Unpager {
    /// Create a new engine
    pub fn new(source: Arc<dyn PageSource>, config: PaginationConfig) -> Self {
        Self {
            source,
            config,
            cancel: CancellationToken::new(),
            timeout: None,
        }
    }

    /// Abort the run when `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Fail the run with a timeout error once `timeout` has elapsed
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fetch every entry reachable from `url`, in page order
    pub async fn run(&self, url: &Url) -> Result<Entries> {
        self.run_with_stats(url).await.map(|(entries, _)| entries)
    }

    /// Like [`Unpager::run`], also reporting what the run did
    pub async fn run_with_stats(&self, url: &Url) -> Result<(Entries, RunStats)> {
        let start = Instant::now();

        let (collected, mode) = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.traverse(url))
                .await
                .map_err(|_| Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })??,
            None => self.traverse(url).await?,
        };

        let stats = RunStats {
            mode,
            pages_fetched: collected.pages_fetched,
            entries: collected.entries.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Fetched {} entries from {} pages ({})",
            stats.entries, stats.pages_fetched, stats.mode
        );

        Ok((collected.entries, stats))
    }

    async fn traverse(&self, url: &Url) -> Result<(Collected, PageMode)> {
        let decoder = EntryDecoder::with_data_key(self.config.data_key.clone());

        let query: Vec<(String, String)> = self
            .config
            .page_param
            .iter()
            .map(|param| (param.clone(), "1".to_string()))
            .collect();

        let first = tokio::select! {
            () = self.cancel.cancelled() => return Err(Error::Cancelled),
            fetched = self.source.fetch(url, &query) => fetched?,
        };

        let page_size = decoder.entry_slice(&first.body)?.len();
        let mode = resolve_mode(&first, page_size, &self.config)?;
        info!("Pagination mode: {}", mode);
        let entries = decoder.entries(first.body)?;

        let collected = match &mode {
            PageMode::SinglePage => Collected {
                entries,
                pages_fetched: 1,
            },
            PageMode::Count { total_pages } | PageMode::LastLink { total_pages } => {
                // resolve_mode only reports a page total when a page param is set
                let page_param = self.config.page_param.clone().unwrap_or_default();
                ConcurrentFetcher::new(Arc::clone(&self.source), decoder, url.clone(), page_param)
                    .with_cancellation(self.cancel.clone())
                    .fetch_all(entries, *total_pages)
                    .await?
            }
            PageMode::NextChain { next } => {
                debug!("Following next links from {}", next);
                SequentialFollower::new(Arc::clone(&self.source), self.config.clone())
                    .with_cancellation(self.cancel.clone())
                    .follow(entries, next.clone())
                    .await?
            }
        };

        Ok((collected, mode))
    }
}

impl std::fmt::Debug for Unpager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unpager")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
