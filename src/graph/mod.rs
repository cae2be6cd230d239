//! Network topology graph
//!
//! Pure Rust adjacency model on petgraph, a streaming loader for the
//! line-oriented topology format, and the two analytic queries that run
//! against a loaded graph.

pub mod loader;
pub mod model;
pub mod queries;

pub use loader::{load, load_path, LoadError};
pub use model::{GraphError, Link, NetworkGraph, Node};
pub use queries::{infect_min_hops, patch_radius, PatchRadius, QueryError, NO_PATH};
