//! CLI runner - executes a run and prints the result

use super::commands::Cli;
use super::headers::{default_headers, merge_header, parse_header};
use crate::config::UnpageConfig;
use crate::engine::{RunStats, Unpager};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Entries, StringMap};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// True when the `DEBUG` environment variable asks for traffic dumps
pub fn debug_requested() -> bool {
    std::env::var("DEBUG").is_ok_and(|v| !v.is_empty())
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Fetch everything and print it to stdout
    pub async fn run(&self) -> Result<()> {
        let cancel = CancellationToken::new();
        let signals = tokio::spawn(cancel_on_signal(cancel.clone()));

        let result = self.fetch(cancel).await;
        signals.abort();

        let (entries, stats) = result?;
        info!(
            "Done: {} entries, {} pages, {} in {}ms",
            stats.entries, stats.pages_fetched, stats.mode, stats.duration_ms
        );

        println!("{}", self.render(&entries)?);
        Ok(())
    }

    /// Run the engine until done or until `cancel` fires
    pub async fn fetch(&self, cancel: CancellationToken) -> Result<(Entries, RunStats)> {
        let url = Url::parse(&self.cli.url)?;
        let mut config = self.load_config()?;
        config.headers = self.build_headers(&config)?;

        let client = HttpClient::with_config(config.to_http(debug_requested()))?;
        let pagination = config.to_pagination();
        debug!("Pagination: {:?}", pagination);

        Unpager::new(Arc::new(client), pagination)
            .with_cancellation(cancel)
            .with_timeout(config.timeout())
            .run_with_stats(&url)
            .await
    }

    /// Load the profile file, if any, and apply the flags over it
    pub fn load_config(&self) -> Result<UnpageConfig> {
        let mut config = match &self.cli.config {
            Some(path) => UnpageConfig::from_file(path)?,
            None => UnpageConfig::default(),
        };

        if let Some(param) = &self.cli.page_param {
            config.page_param.clone_from(param);
        }
        for (flag, field) in [
            (&self.cli.data_key, &mut config.data_key),
            (&self.cli.next_key, &mut config.next_key),
            (&self.cli.last_key, &mut config.last_key),
            (&self.cli.count_key, &mut config.count_key),
        ] {
            if flag.is_some() {
                field.clone_from(flag);
            }
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_secs = timeout;
        }
        if self.cli.rate_limit.is_some() {
            config.rate_limit = self.cli.rate_limit;
        }

        config.validate()?;
        Ok(config)
    }

    /// Defaults, then profile headers, then `-H` flags
    pub fn build_headers(&self, config: &UnpageConfig) -> Result<StringMap> {
        let mut headers = default_headers();
        for (key, value) in &config.headers {
            merge_header(&mut headers, key.clone(), value.clone());
        }
        for header in &self.cli.headers {
            let (key, value) = parse_header(header)?;
            merge_header(&mut headers, key, value);
        }
        Ok(headers)
    }

    /// Serialize the entries the way they are printed
    pub fn render(&self, entries: &Entries) -> Result<String> {
        let output = if self.cli.pretty {
            serde_json::to_string_pretty(entries)?
        } else {
            serde_json::to_string(entries)?
        };
        Ok(output)
    }
}

/// Cancel `token` on Ctrl-C or SIGTERM
async fn cancel_on_signal(token: CancellationToken) {
    cancel_when(token, wait_for_signal()).await;
}

/// Cancel `token` once `signal` fires
///
/// If the signal handler can't be installed the run simply can't be
/// interrupted; it is never cancelled because of that.
pub(super) async fn cancel_when(
    token: CancellationToken,
    signal: impl Future<Output = std::io::Result<()>>,
) {
    if let Err(e) = signal.await {
        warn!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Interrupted, cancelling");
    token.cancel();
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
