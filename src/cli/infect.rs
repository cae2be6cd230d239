//! Infect command - minimum infection hops between two vulnerable hosts

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::graph::{infect_min_hops, loader, NO_PATH};

pub fn run(input: &Path, src: &str, dst: &str, directed: bool, format: &str) -> Result<()> {
    let graph = loader::load_path(input, directed)?;
    let hops = infect_min_hops(&graph, src, dst)?;

    if format == "json" {
        let payload = json!({
            "mode": "infect",
            "src": src,
            "dst": dst,
            "hops": hops,
            "reachable": hops != NO_PATH,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        // bare integer, -1 included, for script consumption
        println!("{}", hops);
    }
    Ok(())
}
