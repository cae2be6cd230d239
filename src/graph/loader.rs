//! Topology file loader
//!
//! Streaming, single-pass parser for the line-oriented topology format:
//!
//! ```text
//! <N>                      vertex count
//! <id> <true|false>        repeated exactly N times
//! <u> <v> <latency> <enc>  zero or more edge lines, enc in 1..=3
//! ```
//!
//! Blank lines and `#` comments are skipped anywhere in the stream. Edges
//! may only reference hosts declared in the vertex section; the first
//! violation aborts the whole load and no partial graph survives.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::model::{GraphError, NetworkGraph};

/// Errors raised while parsing a topology file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing number-of-nodes header")]
    MissingHeader,

    #[error("first line must be a non-negative integer, got '{0}'")]
    InvalidHeader(String),

    #[error("bad vertex line: '{0}'")]
    VertexFormat(String),

    #[error("expected {expected} vertex lines, found {found}")]
    VertexCount { expected: usize, found: usize },

    #[error("bad edge line: '{0}'")]
    EdgeFormat(String),

    #[error("invalid {what} '{token}' on edge line '{line}'")]
    NumberFormat {
        what: &'static str,
        token: String,
        line: String,
    },

    #[error("negative latency {latency} on edge line '{line}'")]
    NegativeLatency { latency: f64, line: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to read topology")]
    Io(#[from] std::io::Error),
}

/// Parse a topology file into a validated graph.
///
/// `directed` applies to every edge line in the file: when false, each
/// declaration also inserts the mirror arc.
pub fn load_path(path: &Path, directed: bool) -> Result<NetworkGraph, LoadError> {
    let file = File::open(path)?;
    load(BufReader::new(file), directed)
}

/// Parse a topology from any buffered reader
pub fn load<R: BufRead>(reader: R, directed: bool) -> Result<NetworkGraph, LoadError> {
    let mut lines = reader.lines();
    let mut graph = NetworkGraph::new();

    // Vertex-count header
    let header = next_significant(&mut lines)?.ok_or(LoadError::MissingHeader)?;
    let expected: usize = header
        .parse()
        .map_err(|_| LoadError::InvalidHeader(header.clone()))?;

    // Vertex section: exactly `expected` significant lines
    for found in 0..expected {
        let line = next_significant(&mut lines)?.ok_or(LoadError::VertexCount {
            expected,
            found,
        })?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(LoadError::VertexFormat(line));
        }
        let vulnerable = parse_flag(parts[1]).ok_or_else(|| LoadError::VertexFormat(line.clone()))?;
        graph.add_node(parts[0], vulnerable)?;
    }
    debug!("parsed {} vertex lines", expected);

    // Everything left is an edge declaration
    while let Some(line) = next_significant(&mut lines)? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(LoadError::EdgeFormat(line));
        }
        let latency: f64 = parts[2].parse().map_err(|_| LoadError::NumberFormat {
            what: "latency",
            token: parts[2].to_string(),
            line: line.clone(),
        })?;
        let encryption: i64 = parts[3].parse().map_err(|_| LoadError::NumberFormat {
            what: "encryption level",
            token: parts[3].to_string(),
            line: line.clone(),
        })?;
        if latency < 0.0 {
            return Err(LoadError::NegativeLatency { latency, line });
        }
        graph.add_link(parts[0], parts[1], latency, encryption, directed)?;
    }

    debug!(
        "loaded topology: {} nodes ({} vulnerable), {} links",
        graph.node_count(),
        graph.vulnerable_count(),
        graph.link_count()
    );
    Ok(graph)
}

/// Next trimmed line that is neither blank nor a `#` comment
fn next_significant<B: BufRead>(
    lines: &mut std::io::Lines<B>,
) -> Result<Option<String>, LoadError> {
    for line in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return Ok(Some(trimmed.to_string()));
    }
    Ok(None)
}

/// Case-insensitive `true`/`false`; anything else is a format error
fn parse_flag(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
