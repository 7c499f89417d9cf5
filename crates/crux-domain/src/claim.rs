//! Claim module - the fundamental unit of the decision graph

use crate::ProvenanceRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a claim within one turn's graph
///
/// Ordering is lexical on the underlying string. Every sort and tie-break in
/// the engine goes through this ordering, so identical inputs always produce
/// identical tiers, forcing-point order and cascades.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a claim id from any string-like value
    ///
    /// # Examples
    ///
    /// ```
    /// use crux_domain::ClaimId;
    ///
    /// let id = ClaimId::new("c0");
    /// assert_eq!(id.as_str(), "c0");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClaimId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Epistemic classification of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    /// A statement about how things are
    Factual,
    /// A recommendation or course of action
    Prescriptive,
    /// Only holds under some stated condition
    Conditional,
    /// Perspectives explicitly disagree about it
    Contested,
    /// Forward-looking or unverified
    Speculative,
}

impl ClaimType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Factual => "factual",
            ClaimType::Prescriptive => "prescriptive",
            ClaimType::Conditional => "conditional",
            ClaimType::Contested => "contested",
            ClaimType::Speculative => "speculative",
        }
    }

    /// Parse a claim type from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "factual" => Some(ClaimType::Factual),
            "prescriptive" => Some(ClaimType::Prescriptive),
            "conditional" => Some(ClaimType::Conditional),
            "contested" => Some(ClaimType::Contested),
            "speculative" => Some(ClaimType::Speculative),
            _ => None,
        }
    }
}

impl std::str::FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim type: {}", s))
    }
}

/// Role of a claim relative to the claims it conflicts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Mainstream-supported position (the default)
    #[default]
    Anchor,
    /// Contesting minority view
    Challenger,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anchor => "anchor",
            Role::Challenger => "challenger",
        }
    }
}

/// A claim as it sits in a built graph
///
/// Claims are immutable once the graph is built. `role`, `support_ratio` and
/// `tier` are derived by the graph builder and never taken from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier within the turn
    pub id: ClaimId,

    /// Short human-readable label
    pub label: String,

    /// Full statement text
    pub text: String,

    /// Epistemic classification
    pub claim_type: ClaimType,

    /// Anchor or challenger
    pub role: Role,

    /// Indices of the perspectives that produced this claim (sorted, distinct)
    pub supporters: Vec<usize>,

    /// `supporters / max(1, total_perspectives)`
    pub support_ratio: f64,

    /// References into the external evidence store
    pub provenance: Vec<ProvenanceRef>,

    /// Prerequisite depth (0 = no prerequisites)
    pub tier: usize,
}

impl Claim {
    /// Create a claim with default role and zero tier
    ///
    /// Supporters are sorted and deduplicated; the ratio is left at 0 until
    /// the graph builder fills it in.
    pub fn new(
        id: impl Into<ClaimId>,
        label: impl Into<String>,
        text: impl Into<String>,
        claim_type: ClaimType,
        mut supporters: Vec<usize>,
    ) -> Self {
        supporters.sort_unstable();
        supporters.dedup();
        Self {
            id: id.into(),
            label: label.into(),
            text: text.into(),
            claim_type,
            role: Role::Anchor,
            supporters,
            support_ratio: 0.0,
            provenance: Vec::new(),
            tier: 0,
        }
    }

    /// Attach provenance references
    pub fn with_provenance(mut self, provenance: Vec<ProvenanceRef>) -> Self {
        self.provenance = provenance;
        self
    }

    /// Number of distinct supporting perspectives
    pub fn support_count(&self) -> usize {
        self.supporters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_lexical_ordering() {
        let a = ClaimId::new("c10");
        let b = ClaimId::new("c2");
        // Lexical, not numeric
        assert!(a < b);
    }

    #[test]
    fn test_claim_type_parse() {
        assert_eq!(ClaimType::parse("Factual"), Some(ClaimType::Factual));
        assert_eq!(ClaimType::parse("SPECULATIVE"), Some(ClaimType::Speculative));
        assert!(ClaimType::parse("opinion").is_none());
        assert!("contested".parse::<ClaimType>().is_ok());
    }

    #[test]
    fn test_claim_dedups_supporters() {
        let claim = Claim::new("c0", "A", "text", ClaimType::Factual, vec![2, 0, 2, 1]);
        assert_eq!(claim.supporters, vec![0, 1, 2]);
        assert_eq!(claim.support_count(), 3);
        assert_eq!(claim.role, Role::Anchor);
        assert_eq!(claim.tier, 0);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ClaimType::Prescriptive).unwrap();
        assert_eq!(json, "\"prescriptive\"");
        let role: Role = serde_json::from_str("\"challenger\"").unwrap();
        assert_eq!(role, Role::Challenger);
        let id: ClaimId = serde_json::from_str("\"c7\"").unwrap();
        assert_eq!(id, ClaimId::new("c7"));
    }
}
