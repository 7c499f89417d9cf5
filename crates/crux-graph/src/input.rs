//! The assembled graph document handed over by the claim assembler

use crux_domain::{Claim, ClaimId, ClaimType, ConditionalGate, Edge, ProvenanceRef};
use serde::{Deserialize, Serialize};

/// A claim before role, support ratio and tier are derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimInput {
    /// Unique identifier within the turn
    pub id: ClaimId,

    /// Short label
    pub label: String,

    /// Full statement text
    #[serde(default)]
    pub text: String,

    /// Epistemic classification
    pub claim_type: ClaimType,

    /// Indices of supporting perspectives
    #[serde(default)]
    pub supporters: Vec<usize>,

    /// References into the evidence store
    #[serde(default)]
    pub provenance: Vec<ProvenanceRef>,
}

impl ClaimInput {
    /// Create an input claim with no provenance
    pub fn new(
        id: impl Into<ClaimId>,
        label: impl Into<String>,
        claim_type: ClaimType,
        supporters: Vec<usize>,
    ) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            text: label.clone(),
            label,
            claim_type,
            supporters,
            provenance: Vec::new(),
        }
    }

    pub(crate) fn into_claim(self) -> Claim {
        Claim::new(self.id, self.label, self.text, self.claim_type, self.supporters)
            .with_provenance(self.provenance)
    }
}

/// Everything the builder needs for one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimGraphInput {
    /// Number of perspectives that answered the query
    pub total_perspectives: usize,

    /// Claims in assembler order
    #[serde(default)]
    pub claims: Vec<ClaimInput>,

    /// Prerequisite and conflict edges
    #[serde(default)]
    pub edges: Vec<Edge>,

    /// Conditional gates
    #[serde(default)]
    pub gates: Vec<ConditionalGate>,
}

impl ClaimGraphInput {
    /// Start an empty document
    pub fn new(total_perspectives: usize) -> Self {
        Self {
            total_perspectives,
            ..Default::default()
        }
    }

    /// Add a claim
    pub fn claim(mut self, claim: ClaimInput) -> Self {
        self.claims.push(claim);
        self
    }

    /// Add an edge
    pub fn edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add a conditional gate
    pub fn gate(mut self, gate: ConditionalGate) -> Self {
        self.gates.push(gate);
        self
    }
}
