//! Patch command - weighted patch radius from a clean server

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::graph::{loader, patch_radius, PatchRadius};

pub fn run(input: &Path, server: &str, directed: bool, format: &str) -> Result<()> {
    let graph = loader::load_path(input, directed)?;
    let radius = patch_radius(&graph, server)?;

    if format == "json" {
        let payload = json!({
            "mode": "patch",
            "server": server,
            "radius": radius.to_string(),
            "reachable": !matches!(radius, PatchRadius::Unreachable),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        // one-decimal numeral, or the literal INF
        println!("{}", radius);
    }
    Ok(())
}
