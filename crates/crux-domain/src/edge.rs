//! Edge module - pairwise links between claims

use crate::{ClaimId, ProvenanceRef};
use serde::{Deserialize, Serialize};

/// Kind of link between two claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `from` must hold before `to` is viable
    Prerequisite,

    /// `from` and `to` are mutually exclusive
    Conflict,
}

impl EdgeKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Prerequisite => "prerequisite",
            EdgeKind::Conflict => "conflict",
        }
    }
}

/// A directed link between two claims
///
/// Conflict edges are symmetric in meaning; direction only matters for
/// prerequisites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source claim
    pub from: ClaimId,

    /// Target claim
    pub to: ClaimId,

    /// Prerequisite or conflict
    pub kind: EdgeKind,

    /// Question the assembler attached to this edge, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// Evidence supporting the link
    #[serde(default)]
    pub provenance: Vec<ProvenanceRef>,
}

impl Edge {
    /// `from` must hold before `to` is viable
    pub fn prerequisite(from: impl Into<ClaimId>, to: impl Into<ClaimId>) -> Self {
        Self::new(from, to, EdgeKind::Prerequisite)
    }

    /// `a` and `b` are mutually exclusive
    pub fn conflict(a: impl Into<ClaimId>, b: impl Into<ClaimId>) -> Self {
        Self::new(a, b, EdgeKind::Conflict)
    }

    /// Create an edge without question or provenance
    pub fn new(from: impl Into<ClaimId>, to: impl Into<ClaimId>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            question: None,
            provenance: Vec::new(),
        }
    }

    /// Attach a question
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Attach provenance references
    pub fn with_provenance(mut self, provenance: Vec<ProvenanceRef>) -> Self {
        self.provenance = provenance;
        self
    }

    /// Endpoints ordered lexically, used as the dedup key for conflicts
    pub fn sorted_pair(&self) -> (&ClaimId, &ClaimId) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_pair_ignores_direction() {
        let forward = Edge::conflict("b", "a");
        let backward = Edge::conflict("a", "b");
        assert_eq!(forward.sorted_pair(), backward.sorted_pair());
        assert_eq!(forward.sorted_pair().0.as_str(), "a");
    }

    #[test]
    fn test_builder_helpers() {
        let edge = Edge::prerequisite("c0", "c1").with_question("Does c0 hold?");
        assert_eq!(edge.kind, EdgeKind::Prerequisite);
        assert_eq!(edge.question.as_deref(), Some("Does c0 hold?"));
        assert!(edge.provenance.is_empty());
    }
}
