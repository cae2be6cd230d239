//! Stats command - validate a topology file and summarize it

use anyhow::Result;
use console::style;
use serde_json::json;
use std::path::Path;

use crate::graph::loader;

pub fn run(input: &Path, directed: bool, format: &str) -> Result<()> {
    let graph = loader::load_path(input, directed)?;

    let nodes = graph.node_count();
    let vulnerable = graph.vulnerable_count();
    let clean = nodes - vulnerable;
    let links = graph.link_count();

    if format == "json" {
        let payload = json!({
            "nodes": nodes,
            "vulnerable": vulnerable,
            "clean": clean,
            "links": links,
            "directed": directed,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n{} Topology Statistics\n", style("📊").bold());

    println!("  {}: {}", style("Nodes").cyan(), style(nodes).bold());
    println!(
        "  {}: {}",
        style("Vulnerable").red(),
        style(vulnerable).bold()
    );
    println!("  {}: {}", style("Clean").green(), style(clean).bold());

    // undirected loads store both arcs of each declaration
    println!();
    println!("  {}: {}", style("Stored arcs").cyan(), style(links).bold());
    println!(
        "  Loaded as: {}",
        if directed { "directed" } else { "undirected" }
    );

    Ok(())
}
