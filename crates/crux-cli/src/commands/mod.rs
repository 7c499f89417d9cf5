//! Command implementations.

pub mod config;
pub mod inspect;
pub mod points;
pub mod walk;

pub use self::config::execute_config;
pub use self::inspect::execute_inspect;
pub use self::points::execute_points;
pub use self::walk::execute_walk;

use crate::error::Result;
use crux_graph::{ClaimGraph, ClaimGraphInput, GraphConfig};
use std::fs;
use std::path::Path;

/// Read a JSON claim-graph document and build the graph.
pub fn load_graph(path: &Path, config: &GraphConfig) -> Result<ClaimGraph> {
    let contents = fs::read_to_string(path)?;
    let input: ClaimGraphInput = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), claims = input.claims.len(), "graph document loaded");
    Ok(ClaimGraph::build(input, config.clone()))
}
