//! Infection-path and patch-radius queries
//!
//! Both queries run over a loaded, read-only [`NetworkGraph`]. The infection
//! query is an unweighted BFS restricted to vulnerable hosts; the patch
//! radius is a single-source Dijkstra over effective link cost, reduced to
//! the farthest vulnerable host.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use petgraph::graph::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::debug;

use super::model::NetworkGraph;

/// Minimum improvement for a relaxation to be accepted. Keeps float jitter
/// from re-expanding settled hosts.
const RELAX_EPSILON: f64 = 1e-9;

/// Sentinel for "no vulnerable-only path exists"
pub const NO_PATH: i64 = -1;

/// Errors raised by query preconditions
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("server must not be vulnerable: {0}")]
    VulnerableServer(String),
}

/// Result of a patch-radius query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatchRadius {
    /// Farthest vulnerable host, in effective-cost units
    Finite(f64),
    /// At least one vulnerable host cannot be reached from the server
    Unreachable,
}

impl fmt::Display for PatchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchRadius::Finite(radius) => write!(f, "{:.1}", radius),
            PatchRadius::Unreachable => write!(f, "INF"),
        }
    }
}

/// Minimum number of hops an infection needs to travel from `src` to `dst`.
///
/// Every host on the path, endpoints included, must be vulnerable. Returns
/// [`NO_PATH`] when either endpoint is clean or no vulnerable-only route
/// exists, and `0` for a vulnerable self-pair. Latency and encryption play
/// no role here.
pub fn infect_min_hops(graph: &NetworkGraph, src: &str, dst: &str) -> Result<i64, QueryError> {
    let src_idx = graph
        .node_index(src)
        .ok_or_else(|| QueryError::UnknownNode(src.to_string()))?;
    let dst_idx = graph
        .node_index(dst)
        .ok_or_else(|| QueryError::UnknownNode(dst.to_string()))?;

    if !graph.node(src_idx).vulnerable || !graph.node(dst_idx).vulnerable {
        return Ok(NO_PATH);
    }
    if src_idx == dst_idx {
        return Ok(0);
    }

    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    visited.insert(src_idx);
    let mut queue: VecDeque<(NodeIndex, i64)> = VecDeque::new();
    queue.push_back((src_idx, 0));

    while let Some((node, hops)) = queue.pop_front() {
        for (next, _) in graph.links_from(node) {
            if !graph.node(next).vulnerable || !visited.insert(next) {
                continue;
            }
            // BFS discovers hosts in non-decreasing hop order, so the first
            // sighting of dst is already optimal
            if next == dst_idx {
                return Ok(hops + 1);
            }
            queue.push_back((next, hops + 1));
        }
    }

    debug!("no vulnerable-only path from {} to {}", src, dst);
    Ok(NO_PATH)
}

/// Weighted distance from a clean server to its farthest vulnerable host.
///
/// Runs Dijkstra from `server` using [`Link::effective_cost`] as the edge
/// weight, then takes the maximum settled distance over vulnerable hosts
/// (0.0 when there are none). A single unreachable vulnerable host makes
/// the whole radius [`PatchRadius::Unreachable`].
///
/// [`Link::effective_cost`]: super::model::Link::effective_cost
pub fn patch_radius(graph: &NetworkGraph, server: &str) -> Result<PatchRadius, QueryError> {
    let server_idx = graph
        .node_index(server)
        .ok_or_else(|| QueryError::UnknownNode(server.to_string()))?;
    if graph.node(server_idx).vulnerable {
        return Err(QueryError::VulnerableServer(server.to_string()));
    }

    let mut dist: FxHashMap<NodeIndex, f64> = FxHashMap::default();
    let mut heap = BinaryHeap::new();

    dist.insert(server_idx, 0.0);
    heap.push(HeapEntry {
        cost: 0.0,
        node: server_idx,
    });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        // lazy deletion: skip entries superseded by a later relaxation
        if let Some(&best) = dist.get(&node) {
            if cost > best {
                continue;
            }
        }

        for (next, link) in graph.links_from(node) {
            let next_cost = cost + link.effective_cost();
            let improves = dist
                .get(&next)
                .map(|&d| next_cost + RELAX_EPSILON < d)
                .unwrap_or(true);

            if improves {
                dist.insert(next, next_cost);
                heap.push(HeapEntry {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let mut radius = 0.0_f64;
    for (idx, node) in graph.nodes() {
        if !node.vulnerable {
            continue;
        }
        match dist.get(&idx) {
            Some(&d) => radius = radius.max(d),
            None => {
                debug!("vulnerable host {} unreachable from {}", node.id, server);
                return Ok(PatchRadius::Unreachable);
            }
        }
    }
    Ok(PatchRadius::Finite(radius))
}

/// Frontier entry for Dijkstra's priority queue
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}
