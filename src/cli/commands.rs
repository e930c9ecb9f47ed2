//! CLI arguments and parsing

use clap::Parser;
use std::path::PathBuf;

/// Fetch every page of a paginated JSON API and print the combined entries
#[derive(Parser, Debug)]
#[command(name = "unpage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL of the first page
    #[arg(value_name = "URL")]
    pub url: String,

    /// Extra request header ("Key: value"), repeatable
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Query parameter carrying the page number (empty disables page numbers)
    #[arg(short = 'P', long = "param-page", value_name = "NAME")]
    pub page_param: Option<String>,

    /// Dotted path to the entry array
    #[arg(short = 'D', long, value_name = "KEY")]
    pub data_key: Option<String>,

    /// Dotted path to the next page link
    #[arg(short = 'N', long, value_name = "KEY")]
    pub next_key: Option<String>,

    /// Dotted path to the last page link
    #[arg(short = 'L', long, value_name = "KEY")]
    pub last_key: Option<String>,

    /// Dotted path to the total entry count
    #[arg(short = 'C', long, value_name = "KEY")]
    pub count_key: Option<String>,

    /// Deadline for the whole run, in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Maximum requests per second
    #[arg(long, value_name = "RPS")]
    pub rate_limit: Option<u32>,

    /// Profile file (YAML); flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
