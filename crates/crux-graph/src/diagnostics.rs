//! Data-quality diagnostics collected while building a graph

use crux_domain::{ClaimId, EdgeKind, GateId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something the builder dropped or worked around
///
/// Upstream extraction is probabilistic, so none of these stop a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A claim id appeared more than once; the later claim was dropped
    DuplicateClaim {
        /// The repeated id
        claim: ClaimId,
    },

    /// An edge endpoint is not a known claim; the edge was dropped
    DanglingEdge {
        /// Source claim
        from: ClaimId,
        /// Target claim
        to: ClaimId,
        /// Edge kind
        kind: EdgeKind,
    },

    /// An edge links a claim to itself; the edge was dropped
    SelfEdge {
        /// The claim
        claim: ClaimId,
        /// Edge kind
        kind: EdgeKind,
    },

    /// A gate referenced an unknown claim; the reference was removed
    UnknownGateClaim {
        /// The gate
        gate: GateId,
        /// The unknown claim
        claim: ClaimId,
    },

    /// A gate had no known claims left; the gate was dropped
    EmptyGate {
        /// The gate
        gate: GateId,
    },

    /// A gate id appeared more than once; the later gate was dropped
    DuplicateGate {
        /// The repeated id
        gate: GateId,
    },

    /// A gate depended on an unknown (or itself); the dependency was removed
    UnknownGateDependency {
        /// The dependent gate
        gate: GateId,
        /// The missing dependency
        depends_on: GateId,
    },

    /// The prerequisite graph contains a cycle
    PrerequisiteCycle {
        /// From the first occurrence to the repeat, inclusive
        path: Vec<ClaimId>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateClaim { claim } => {
                write!(f, "duplicate claim '{}' dropped", claim)
            }
            Diagnostic::DanglingEdge { from, to, kind } => {
                write!(f, "{} edge {} -> {} references an unknown claim", kind.as_str(), from, to)
            }
            Diagnostic::SelfEdge { claim, kind } => {
                write!(f, "{} edge from '{}' to itself dropped", kind.as_str(), claim)
            }
            Diagnostic::UnknownGateClaim { gate, claim } => {
                write!(f, "gate '{}' references unknown claim '{}'", gate, claim)
            }
            Diagnostic::EmptyGate { gate } => {
                write!(f, "gate '{}' has no known claims and was dropped", gate)
            }
            Diagnostic::DuplicateGate { gate } => {
                write!(f, "duplicate gate '{}' dropped", gate)
            }
            Diagnostic::UnknownGateDependency { gate, depends_on } => {
                write!(f, "gate '{}' depends on unknown gate '{}'", gate, depends_on)
            }
            Diagnostic::PrerequisiteCycle { path } => {
                let ids: Vec<&str> = path.iter().map(|id| id.as_str()).collect();
                write!(f, "prerequisite cycle: {}", ids.join(" -> "))
            }
        }
    }
}
