//! Forcing point extraction
//!
//! A forcing point is the unit the user actually answers. Conditional points
//! come from gates, conflict points from tensions. The list is ordered by
//! ascending tier, conditionals before conflicts within a tier, then by
//! insertion order (gate order, then first-seen conflict edge order), and is
//! immutable once built.

use crux_domain::{ClaimId, GateId, ProvenanceRef, Role};
use crux_graph::ClaimGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a forcing point, derived from its gate or claim pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForcingPointId(String);

impl ForcingPointId {
    /// Wrap a raw id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Id of the conditional point for a gate
    pub fn for_gate(gate: &GateId) -> Self {
        Self(format!("cond:{}", gate))
    }

    /// Id of the conflict point for a claim pair (order-insensitive)
    ///
    /// `|` and `\` inside a claim id are backslash-escaped so that distinct
    /// pairs never share an id.
    pub fn for_conflict(a: &ClaimId, b: &ClaimId) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!(
            "conflict:{}|{}",
            escape_claim(first),
            escape_claim(second)
        ))
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape_claim(id: &ClaimId) -> String {
    let mut escaped = String::with_capacity(id.as_str().len());
    for c in id.as_str().chars() {
        if c == '|' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl fmt::Display for ForcingPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ForcingPointId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The two forcing-point families
///
/// Ordering puts conditionals before conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForcingPointKind {
    /// Does a precondition hold?
    Conditional,
    /// Which of two exclusive claims?
    Conflict,
}

impl fmt::Display for ForcingPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForcingPointKind::Conditional => f.write_str("conditional"),
            ForcingPointKind::Conflict => f.write_str("conflict"),
        }
    }
}

/// One side of a conflict point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictOption {
    /// The claim chosen by picking this option
    pub claim_id: ClaimId,
    /// Claim label, for display
    pub label: String,
    /// Anchor or challenger
    pub role: Role,
    /// Advisory only: what this option rests on
    pub prerequisites: Vec<ClaimId>,
}

/// What a forcing point decides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ForcingTarget {
    /// Claims removed if the gate's condition fails
    Conditional {
        /// Source gate
        gate: GateId,
        /// Deduplicated affected claims
        affected_claims: Vec<ClaimId>,
    },
    /// Mutually exclusive options, lexically ordered
    Conflict {
        /// Both sides of the tension
        options: Vec<ConflictOption>,
    },
}

/// A single user-facing question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcingPoint {
    /// Stable identifier
    pub id: ForcingPointId,
    /// Tier inherited from the claims it targets
    pub tier: usize,
    /// Question to ask
    pub question: String,
    /// Condition being tested (conditionals only)
    pub condition: Option<String>,
    /// Points whose resolution should come first
    pub blocked_by: Vec<ForcingPointId>,
    /// Evidence behind the question
    pub provenance: Vec<ProvenanceRef>,
    /// What the answer decides
    pub target: ForcingTarget,
}

impl ForcingPoint {
    /// Conditional or conflict
    pub fn kind(&self) -> ForcingPointKind {
        match self.target {
            ForcingTarget::Conditional { .. } => ForcingPointKind::Conditional,
            ForcingTarget::Conflict { .. } => ForcingPointKind::Conflict,
        }
    }

    /// Affected claims of a conditional point; empty for conflicts
    pub fn affected_claims(&self) -> &[ClaimId] {
        match &self.target {
            ForcingTarget::Conditional { affected_claims, .. } => affected_claims,
            ForcingTarget::Conflict { .. } => &[],
        }
    }

    /// Options of a conflict point; empty for conditionals
    pub fn options(&self) -> &[ConflictOption] {
        match &self.target {
            ForcingTarget::Conditional { .. } => &[],
            ForcingTarget::Conflict { options } => options,
        }
    }

    /// Whether `claim` is one of this point's options
    pub fn has_option(&self, claim: &ClaimId) -> bool {
        self.options().iter().any(|o| &o.claim_id == claim)
    }

    /// Every claim this point can prune
    pub fn target_claims(&self) -> Vec<&ClaimId> {
        match &self.target {
            ForcingTarget::Conditional { affected_claims, .. } => affected_claims.iter().collect(),
            ForcingTarget::Conflict { options } => options.iter().map(|o| &o.claim_id).collect(),
        }
    }
}

/// Derive the ordered forcing-point list for a graph
pub fn extract_forcing_points(graph: &ClaimGraph) -> Vec<ForcingPoint> {
    let mut points = Vec::with_capacity(graph.gates().len() + graph.tensions().len());

    for gate in graph.gates() {
        let tier = gate
            .affected_claims
            .iter()
            .filter_map(|claim| graph.tier(claim))
            .max()
            .unwrap_or(0);

        points.push(ForcingPoint {
            id: ForcingPointId::for_gate(&gate.id),
            tier,
            question: gate.question.clone(),
            condition: Some(gate.condition.clone()),
            blocked_by: gate.depends_on.iter().map(ForcingPointId::for_gate).collect(),
            provenance: gate.provenance.clone(),
            target: ForcingTarget::Conditional {
                gate: gate.id.clone(),
                affected_claims: gate.affected_claims.clone(),
            },
        });
    }

    for tension in graph.tensions() {
        let options: Vec<ConflictOption> = tension
            .claims()
            .into_iter()
            .filter_map(|id| {
                let claim = graph.claim(id)?;
                Some(ConflictOption {
                    claim_id: id.clone(),
                    label: claim.label.clone(),
                    role: claim.role,
                    prerequisites: graph.prerequisites_of(id).cloned().collect(),
                })
            })
            .collect();

        let mut seen = BTreeSet::new();
        let blocked_by: Vec<ForcingPointId> = graph
            .gates()
            .iter()
            .filter(|gate| {
                gate.affected_claims.iter().any(|c| c == &tension.a || c == &tension.b)
            })
            .filter(|gate| seen.insert(&gate.id))
            .map(|gate| ForcingPointId::for_gate(&gate.id))
            .collect();

        let question = tension.question.clone().unwrap_or_else(|| {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            format!("{}?", labels.join(" or "))
        });

        points.push(ForcingPoint {
            id: ForcingPointId::for_conflict(&tension.a, &tension.b),
            tier: tension.tier,
            question,
            condition: None,
            blocked_by,
            provenance: tension.provenance.clone(),
            target: ForcingTarget::Conflict { options },
        });
    }

    // Stable: equal keys keep insertion order
    points.sort_by_key(|p| (p.tier, p.kind()));

    tracing::debug!(count = points.len(), "forcing points extracted");
    points
}
