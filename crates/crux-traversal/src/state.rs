//! Traversal state values

use crate::{ForcingPointId, ForcingPointKind};
use crux_domain::ClaimId;
use crux_graph::ClaimGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status of a claim within one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Still viable
    Active,
    /// Removed; terminal for this traversal
    Pruned,
}

/// How a forcing point was answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolutionOutcome {
    /// Answer to a conditional point
    Conditional {
        /// Whether the condition holds
        satisfied: bool,
    },
    /// Answer to a conflict point
    Conflict {
        /// The option kept
        selected_claim_id: ClaimId,
    },
}

/// A recorded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The answered point
    pub forcing_point_id: ForcingPointId,
    /// What was decided
    pub outcome: ResolutionOutcome,
    /// Anything the user typed alongside the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_input: Option<String>,
}

impl Resolution {
    /// Kind of point this resolution answers
    pub fn kind(&self) -> ForcingPointKind {
        match self.outcome {
            ResolutionOutcome::Conditional { .. } => ForcingPointKind::Conditional,
            ResolutionOutcome::Conflict { .. } => ForcingPointKind::Conflict,
        }
    }
}

/// Claim status, resolutions and rendered path for one traversal
///
/// Values are never mutated through the public API: every resolution
/// returns a new state. A state is only meaningful together with the graph
/// it was started from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalState {
    claim_status: BTreeMap<ClaimId, ClaimStatus>,
    resolutions: BTreeMap<ForcingPointId, Resolution>,
    path_steps: Vec<String>,
}

impl TraversalState {
    /// Fresh state: every claim active, nothing resolved
    pub fn new(graph: &ClaimGraph) -> Self {
        Self {
            claim_status: graph
                .claim_ids()
                .map(|id| (id.clone(), ClaimStatus::Active))
                .collect(),
            resolutions: BTreeMap::new(),
            path_steps: Vec::new(),
        }
    }

    /// Status of a claim, if the state knows it
    pub fn status(&self, id: &ClaimId) -> Option<ClaimStatus> {
        self.claim_status.get(id).copied()
    }

    /// Whether a claim is still active; unknown claims are not
    pub fn is_active(&self, id: &ClaimId) -> bool {
        self.status(id) == Some(ClaimStatus::Active)
    }

    /// Full status map
    pub fn claim_status(&self) -> &BTreeMap<ClaimId, ClaimStatus> {
        &self.claim_status
    }

    /// Active claims in lexical order
    pub fn active_claims(&self) -> impl Iterator<Item = &ClaimId> {
        self.with_status(ClaimStatus::Active)
    }

    /// Pruned claims in lexical order
    pub fn pruned_claims(&self) -> impl Iterator<Item = &ClaimId> {
        self.with_status(ClaimStatus::Pruned)
    }

    fn with_status(&self, wanted: ClaimStatus) -> impl Iterator<Item = &ClaimId> {
        self.claim_status
            .iter()
            .filter(move |(_, status)| **status == wanted)
            .map(|(id, _)| id)
    }

    /// All recorded resolutions
    pub fn resolutions(&self) -> &BTreeMap<ForcingPointId, Resolution> {
        &self.resolutions
    }

    /// Resolution of a point, if any
    pub fn resolution(&self, id: &ForcingPointId) -> Option<&Resolution> {
        self.resolutions.get(id)
    }

    /// Whether a point has been answered
    pub fn is_resolved(&self, id: &ForcingPointId) -> bool {
        self.resolutions.contains_key(id)
    }

    /// Rendered decisions, in the order they were made
    pub fn path_steps(&self) -> &[String] {
        &self.path_steps
    }

    pub(crate) fn record(&mut self, resolution: Resolution, step: String) {
        self.resolutions
            .insert(resolution.forcing_point_id.clone(), resolution);
        self.path_steps.push(step);
    }

    /// Mark a claim pruned; returns false if it was not active
    pub(crate) fn prune(&mut self, id: &ClaimId) -> bool {
        match self.claim_status.get_mut(id) {
            Some(status @ ClaimStatus::Active) => {
                *status = ClaimStatus::Pruned;
                true
            }
            _ => false,
        }
    }
}

/// The form a caller may persist between turns
///
/// The engine does not pick an encoding; this only derives serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalSnapshot {
    /// Conversation turn the state belongs to
    pub turn_id: String,
    /// The state itself
    pub state: TraversalState,
}

impl TraversalSnapshot {
    /// Pair a state with its turn
    pub fn new(turn_id: impl Into<String>, state: TraversalState) -> Self {
        Self {
            turn_id: turn_id.into(),
            state,
        }
    }
}
