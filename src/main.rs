//! unpage CLI
//!
//! Fetch every page of a paginated JSON API and print the combined entries

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unpage::cli::{debug_requested, Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pure JSON
    let level = if cli.verbose || debug_requested() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
