//! Crux Graph
//!
//! Builds the immutable claim graph for one conversation turn.
//!
//! The builder provides:
//! - Support ratios and anchor/challenger role assignment
//! - Prerequisite tiers, with cycle detection that never fails
//! - Deduplicated tension (conflict) pairs
//! - Diagnostics for dangling or malformed upstream data
//!
//! # Examples
//!
//! ```
//! use crux_domain::{ClaimType, Edge};
//! use crux_graph::{ClaimGraph, ClaimGraphInput, ClaimInput, GraphConfig};
//!
//! let input = ClaimGraphInput::new(3)
//!     .claim(ClaimInput::new("c0", "Use Postgres", ClaimType::Prescriptive, vec![0, 1, 2]))
//!     .claim(ClaimInput::new("c1", "Use SQLite", ClaimType::Prescriptive, vec![2]))
//!     .edge(Edge::conflict("c0", "c1"));
//!
//! let graph = ClaimGraph::build(input, GraphConfig::default());
//! assert_eq!(graph.tensions().len(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod diagnostics;
mod error;
mod graph;
mod input;
pub mod roles;
pub mod tension;
pub mod tiers;

pub use config::{GraphConfig, DEFAULT_HIGH_SUPPORT_THRESHOLD, DEFAULT_SUPPORT_DELTA_THRESHOLD};
pub use diagnostics::Diagnostic;
pub use error::GraphError;
pub use graph::ClaimGraph;
pub use input::{ClaimGraphInput, ClaimInput};
pub use tension::Tension;
pub use tiers::{compute_tiers, TierReport};
