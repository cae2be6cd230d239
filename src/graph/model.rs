//! In-memory network topology model
//!
//! Pure Rust adjacency storage using petgraph. A graph is assembled once by
//! the loader and treated as read-only by every query afterwards, so there
//! is no locking and no persistence layer.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while assembling a topology
#[derive(Error, Debug)]
pub enum GraphError {
    /// Same host declared twice with opposite vulnerability flags
    #[error("conflicting vulnerability for node: {0}")]
    NodeConflict(String),

    /// Link endpoint that was never declared in the vertex section
    #[error("edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("encryption level {level} out of range (1-3) on edge {from} {to}")]
    EncryptionRange {
        from: String,
        to: String,
        level: i64,
    },
}

/// A host in the topology
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub vulnerable: bool,
}

/// A directed link between two hosts
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub latency: f64,
    /// Encryption level, validated to 1..=3 before insertion
    pub encryption: u8,
}

impl Link {
    /// Weighted cost used by the patch-radius query.
    ///
    /// Stronger encryption is cheaper to push a patch across: level 3 keeps
    /// the raw latency, level 2 adds 10%, level 1 adds 20%. Computed per
    /// traversal, never cached.
    pub fn effective_cost(&self) -> f64 {
        self.latency * (1.0 + f64::from(3 - i16::from(self.encryption)) / 10.0)
    }
}

/// Network topology - petgraph adjacency plus a host-id index
#[derive(Debug)]
pub struct NetworkGraph {
    graph: DiGraph<Node, Link>,
    /// Node lookup by host id
    node_index: HashMap<String, NodeIndex>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    // ==================== Node Operations ====================

    /// Register a host. Re-declaring an id with a matching flag is a no-op;
    /// re-declaring with the opposite flag is a `NodeConflict`.
    pub fn add_node(&mut self, id: &str, vulnerable: bool) -> Result<NodeIndex, GraphError> {
        if let Some(&idx) = self.node_index.get(id) {
            if self.graph[idx].vulnerable != vulnerable {
                return Err(GraphError::NodeConflict(id.to_string()));
            }
            return Ok(idx);
        }

        let idx = self.graph.add_node(Node {
            id: id.to_string(),
            vulnerable,
        });
        self.node_index.insert(id.to_string(), idx);
        Ok(idx)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get node index by host id
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    // ==================== Link Operations ====================

    /// Link two declared hosts. An undirected declaration inserts the mirror
    /// arc as well, carrying identical latency and encryption level.
    pub fn add_link(
        &mut self,
        from: &str,
        to: &str,
        latency: f64,
        encryption: i64,
        directed: bool,
    ) -> Result<(), GraphError> {
        let u = self
            .node_index(from)
            .ok_or_else(|| GraphError::UnknownNode(from.to_string()))?;
        let v = self
            .node_index(to)
            .ok_or_else(|| GraphError::UnknownNode(to.to_string()))?;

        if !(1..=3).contains(&encryption) {
            return Err(GraphError::EncryptionRange {
                from: from.to_string(),
                to: to.to_string(),
                level: encryption,
            });
        }

        let link = Link {
            latency,
            encryption: encryption as u8,
        };
        self.graph.add_edge(u, v, link);
        if !directed {
            self.graph.add_edge(v, u, link);
        }
        Ok(())
    }

    /// Outgoing links of a host as (target, link) pairs
    pub fn links_from(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Link)> {
        self.graph.edges(idx).map(|e| (e.target(), e.weight()))
    }

    // ==================== Stats ====================

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.graph.node_indices().map(move |i| (i, &self.graph[i]))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vulnerable_count(&self) -> usize {
        self.graph.node_weights().filter(|n| n.vulnerable).count()
    }
}

impl Default for NetworkGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_idempotent_for_matching_flag() {
        let mut g = NetworkGraph::new();
        let a = g.add_node("A", true).unwrap();
        let again = g.add_node("A", true).unwrap();

        assert_eq!(a, again);
        assert_eq!(g.node_count(), 1);
        assert!(g.has_node("A"));
        assert!(!g.has_node("B"));
    }

    #[test]
    fn test_add_node_conflicting_flag_fails() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();

        let err = g.add_node("A", false).unwrap_err();
        assert!(matches!(err, GraphError::NodeConflict(id) if id == "A"));
    }

    #[test]
    fn test_directed_link_inserts_one_arc() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();
        g.add_node("B", false).unwrap();

        g.add_link("A", "B", 2.5, 2, true).unwrap();
        assert_eq!(g.link_count(), 1);

        let a = g.node_index("A").unwrap();
        let b = g.node_index("B").unwrap();
        assert_eq!(g.links_from(a).count(), 1);
        assert_eq!(g.links_from(b).count(), 0);
    }

    #[test]
    fn test_undirected_link_inserts_mirror_arc() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();
        g.add_node("B", false).unwrap();

        g.add_link("A", "B", 2.5, 2, false).unwrap();
        assert_eq!(g.link_count(), 2);

        let b = g.node_index("B").unwrap();
        let (_, back) = g.links_from(b).next().unwrap();
        assert_eq!(back.latency, 2.5);
        assert_eq!(back.encryption, 2);
    }

    #[test]
    fn test_link_to_unknown_node_fails() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();

        let err = g.add_link("A", "Z", 1.0, 3, true).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(id) if id == "Z"));

        let err = g.add_link("Z", "A", 1.0, 3, true).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(id) if id == "Z"));
    }

    #[test]
    fn test_encryption_level_out_of_range_fails() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();
        g.add_node("B", true).unwrap();

        for level in [0, 4, -1] {
            let err = g.add_link("A", "B", 1.0, level, true).unwrap_err();
            assert!(matches!(err, GraphError::EncryptionRange { .. }));
        }
        assert_eq!(g.link_count(), 0);
    }

    #[test]
    fn test_effective_cost_by_encryption_level() {
        let by_level = |encryption| Link {
            latency: 10.0,
            encryption,
        };

        assert!((by_level(3).effective_cost() - 10.0).abs() < 1e-12);
        assert!((by_level(2).effective_cost() - 11.0).abs() < 1e-12);
        assert!((by_level(1).effective_cost() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_vulnerable_count() {
        let mut g = NetworkGraph::new();
        g.add_node("A", true).unwrap();
        g.add_node("B", false).unwrap();
        g.add_node("C", true).unwrap();

        assert_eq!(g.vulnerable_count(), 2);
    }
}
