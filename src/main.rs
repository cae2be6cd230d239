//! PittGuard - graph-powered network vulnerability analysis CLI
//!
//! Loads a textual network topology (hosts flagged vulnerable or clean,
//! weighted links with an encryption level) and answers infection-path
//! and patch-radius queries against it.

// Allow dead code for model accessors that exist for API completeness
#![allow(dead_code)]

mod cli;
mod graph;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::graph::{LoadError, QueryError};

fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if let Err(err) = cli::run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

/// Calling scripts can tell load failures (malformed or unreadable topology)
/// from query-argument failures: 3 for the former, 4 for the latter, 1 for
/// anything else. Usage errors exit 2 via clap.
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LoadError>().is_some() {
        3
    } else if err.downcast_ref::<QueryError>().is_some() {
        4
    } else {
        1
    }
}
