//! Conditional gates

use crate::{ClaimId, ProvenanceRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a conditional gate
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(String);

impl GateId {
    /// Create a gate id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GateId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A precondition whose failure removes a known set of claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalGate {
    /// Gate identifier
    pub id: GateId,

    /// Claims removed when the condition does not hold
    pub affected_claims: Vec<ClaimId>,

    /// The condition, stated as a fact about the user's situation
    pub condition: String,

    /// The question put to the user
    pub question: String,

    /// Evidence the gate was derived from
    #[serde(default)]
    pub provenance: Vec<ProvenanceRef>,

    /// Gates that must be answered before this one
    #[serde(default)]
    pub depends_on: Vec<GateId>,
}

impl ConditionalGate {
    /// Create a gate with no provenance or dependencies
    pub fn new(
        id: impl Into<GateId>,
        affected_claims: Vec<ClaimId>,
        condition: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            affected_claims,
            condition: condition.into(),
            question: question.into(),
            provenance: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    /// Declare gates that must be resolved first
    pub fn depending_on(mut self, gates: Vec<GateId>) -> Self {
        self.depends_on = gates;
        self
    }

    /// Attach provenance references
    pub fn with_provenance(mut self, provenance: Vec<ProvenanceRef>) -> Self {
        self.provenance = provenance;
        self
    }
}
