//! Crux Traversal
//!
//! Turns a [`crux_graph::ClaimGraph`] into an ordered list of forcing points
//! and walks the user through them, pruning claims as answers come in.
//!
//! All state transitions are pure: a resolution takes a [`TraversalState`]
//! and returns a new one, leaving the input untouched. Persisting a state
//! between turns is the caller's job; [`TraversalSnapshot`] derives serde for
//! that purpose.
//!
//! # Examples
//!
//! ```
//! use crux_domain::{ClaimType, Edge};
//! use crux_graph::{ClaimGraph, ClaimGraphInput, ClaimInput, GraphConfig};
//! use crux_traversal::{Answer, Traversal};
//!
//! let input = ClaimGraphInput::new(3)
//!     .claim(ClaimInput::new("c0", "Use Postgres", ClaimType::Prescriptive, vec![0, 1]))
//!     .claim(ClaimInput::new("c1", "Use SQLite", ClaimType::Prescriptive, vec![2]))
//!     .edge(Edge::conflict("c0", "c1"));
//! let graph = ClaimGraph::build(input, GraphConfig::default());
//!
//! let traversal = Traversal::new(&graph);
//! let state = traversal.start();
//! let point = traversal.next_point(&state).unwrap();
//! let state = traversal.resolve(&state, &point.id, &Answer::choice("c1")).unwrap();
//!
//! assert!(traversal.is_complete(&state));
//! assert_eq!(traversal.outcome(&state).summary, "1. → Use SQLite over Use Postgres");
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod forcing;
mod session;
mod state;
mod summary;

pub use engine::{
    get_live_forcing_points, is_complete, is_live, resolve_conditional, resolve_conflict,
};
pub use error::TraversalError;
pub use forcing::{
    extract_forcing_points, ConflictOption, ForcingPoint, ForcingPointId, ForcingPointKind,
    ForcingTarget,
};
pub use session::{Answer, Traversal, TraversalOutcome};
pub use state::{ClaimStatus, Resolution, ResolutionOutcome, TraversalSnapshot, TraversalState};
pub use summary::{
    build_path_summary, CHOICE_MARKER, EMPTY_PATH_SUMMARY, SATISFIED_MARKER, UNSATISFIED_MARKER,
};
