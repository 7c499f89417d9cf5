//! Crux Domain Layer
//!
//! Value types shared by the claim graph and the traversal engine. Nothing in
//! this crate computes anything: tiers, roles and support ratios are derived by
//! `crux-graph`, and claim status lives in `crux-traversal`.
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic proposition extracted from one or more model perspectives
//! - **Edge**: A `Prerequisite` or `Conflict` link between two claims
//! - **Conditional Gate**: A precondition whose failure removes a known set of claims
//! - **Provenance**: Opaque references into an external evidence store
//! - **Role**: Anchor (mainstream-supported) or challenger (contesting minority)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod edge;
pub mod gate;
pub mod provenance;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, ClaimType, Role};
pub use edge::{Edge, EdgeKind};
pub use gate::{ConditionalGate, GateId};
pub use provenance::ProvenanceRef;
