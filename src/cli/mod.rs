//! CLI module
//!
//! Command-line interface: one positional URL, flags describing how the API
//! paginates, and the combined entry array written to stdout.

mod commands;
mod headers;
mod runner;

pub use commands::Cli;
pub use headers::{default_headers, merge_header, parse_header};
pub use runner::{debug_requested, Runner};

#[cfg(test)]
mod tests;
