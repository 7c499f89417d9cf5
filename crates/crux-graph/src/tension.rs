//! Tension extraction - deduplicated conflicting-claim pairs

use crux_domain::{ClaimId, Edge, EdgeKind, ProvenanceRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pair of mutually exclusive claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tension {
    /// Lexically smaller claim id
    pub a: ClaimId,

    /// Lexically larger claim id
    pub b: ClaimId,

    /// `max(tier(a), tier(b)) + 1`
    pub tier: usize,

    /// First question attached to any conflict edge of this pair
    pub question: Option<String>,

    /// Provenance merged across all conflict edges of this pair
    pub provenance: Vec<ProvenanceRef>,
}

impl Tension {
    /// Both sides of the pair
    pub fn claims(&self) -> [&ClaimId; 2] {
        [&self.a, &self.b]
    }
}

/// Collect one tension per unordered conflict pair, in first-seen edge order
///
/// Edges whose endpoints have no tier are skipped; the graph builder has
/// already dropped those.
pub fn extract_tensions(edges: &[Edge], tiers: &BTreeMap<ClaimId, usize>) -> Vec<Tension> {
    let mut tensions: Vec<Tension> = Vec::new();
    let mut index: BTreeMap<(ClaimId, ClaimId), usize> = BTreeMap::new();

    for edge in edges.iter().filter(|e| e.kind == EdgeKind::Conflict) {
        let (a, b) = edge.sorted_pair();
        let (Some(tier_a), Some(tier_b)) = (tiers.get(a), tiers.get(b)) else {
            continue;
        };

        match index.get(&(a.clone(), b.clone())) {
            Some(&existing) => {
                let tension = &mut tensions[existing];
                if tension.question.is_none() {
                    tension.question = edge.question.clone();
                }
                for reference in &edge.provenance {
                    if !tension.provenance.contains(reference) {
                        tension.provenance.push(reference.clone());
                    }
                }
            }
            None => {
                index.insert((a.clone(), b.clone()), tensions.len());
                tensions.push(Tension {
                    a: a.clone(),
                    b: b.clone(),
                    tier: (*tier_a).max(*tier_b) + 1,
                    question: edge.question.clone(),
                    provenance: edge.provenance.clone(),
                });
            }
        }
    }

    tensions
}
