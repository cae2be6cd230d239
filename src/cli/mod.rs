//! CLI command definitions and handlers

mod infect;
mod patch;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PittGuard - graph-powered network vulnerability analysis
#[derive(Parser, Debug)]
#[command(name = "pittguard")]
#[command(
    version,
    about = "Analyze network topologies for infection paths and patch coverage",
    long_about = "PittGuard loads a textual network topology (hosts flagged \
vulnerable or clean, weighted links with an encryption level) and answers \
analytic queries against it: the minimum number of hops an infection needs \
to travel between two vulnerable hosts, and the farthest weighted distance \
a patch server must cover to reach every vulnerable host.",
    after_help = "\
Examples:
  pittguard infect -i net.txt --src A --dst B           Minimum infection hops A -> B
  pittguard patch -i net.txt --server S                 Patch radius from server S
  pittguard stats -i net.txt                            Validate and summarize a topology
  pittguard patch -i net.txt --server S --format json   JSON output for scripting"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        env = "PITTGUARD_LOG_LEVEL",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Minimum hops an infection needs between two vulnerable hosts
    #[command(after_help = "\
Examples:
  pittguard infect -i net.txt --src web01 --dst db02
  pittguard infect -i net.txt --src web01 --dst db02 --directed
  pittguard infect -i net.txt --src web01 --dst db02 --format json

Prints the hop count as a bare integer, or -1 when no path exists that
stays on vulnerable hosts end to end.")]
    Infect {
        /// Topology file to load
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Source host (infection origin, must be vulnerable)
        #[arg(long)]
        src: String,

        /// Destination host (must be vulnerable to be infectable)
        #[arg(long)]
        dst: String,

        /// Treat edge lines as one-way links
        #[arg(long)]
        directed: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Weighted distance from a clean server to its farthest vulnerable host
    #[command(after_help = "\
Examples:
  pittguard patch -i net.txt --server patchsrv
  pittguard patch -i net.txt --server patchsrv --directed
  pittguard patch -i net.txt --server patchsrv --format json

Prints the radius with one decimal digit, or INF when any vulnerable host
is unreachable. Link cost is latency scaled by encryption level: level 3
is cost-neutral, level 2 adds 10%, level 1 adds 20%.")]
    Patch {
        /// Topology file to load
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Patch server host (must not be vulnerable)
        #[arg(long)]
        server: String,

        /// Treat edge lines as one-way links
        #[arg(long)]
        directed: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Validate a topology file and show node/link counts
    #[command(after_help = "\
Examples:
  pittguard stats -i net.txt
  pittguard stats -i net.txt --format json

Exits non-zero with a parse error when the file is malformed, so this
doubles as a validation-only run.")]
    Stats {
        /// Topology file to load
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Treat edge lines as one-way links
        #[arg(long)]
        directed: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Infect {
            input,
            src,
            dst,
            directed,
            format,
        } => infect::run(&input, &src, &dst, directed, &format),

        Commands::Patch {
            input,
            server,
            directed,
            format,
        } => patch::run(&input, &server, directed, &format),

        Commands::Stats {
            input,
            directed,
            format,
        } => stats::run(&input, directed, &format),
    }
}
