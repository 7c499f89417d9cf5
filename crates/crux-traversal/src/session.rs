//! Traversal context object
//!
//! Bundles a graph with its forcing points so callers do not have to thread
//! both through every call. Holds no state of its own: every traversal's
//! progress lives in the [`TraversalState`] values it hands out.

use crate::engine::{self, is_live};
use crate::{
    build_path_summary, extract_forcing_points, ForcingPoint, ForcingPointId, TraversalError,
    TraversalState,
};
use crux_domain::ClaimId;
use crux_graph::ClaimGraph;
use serde::{Deserialize, Serialize};

/// A user's answer to a forcing point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Whether a conditional's condition holds
    Condition {
        /// The condition holds
        satisfied: bool,
        /// Free text the user added
        input: Option<String>,
    },
    /// Which conflict option to keep
    Choice {
        /// The kept claim
        claim: ClaimId,
        /// Free text the user added
        input: Option<String>,
    },
}

impl Answer {
    /// Conditional answer without free text
    pub fn condition(satisfied: bool) -> Self {
        Answer::Condition { satisfied, input: None }
    }

    /// Conflict answer without free text
    pub fn choice(claim: impl Into<ClaimId>) -> Self {
        Answer::Choice { claim: claim.into(), input: None }
    }
}

/// What a finished (or abandoned) traversal hands to synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalOutcome {
    /// Claims still standing, lexical order
    pub active: Vec<ClaimId>,
    /// Claims removed, lexical order
    pub pruned: Vec<ClaimId>,
    /// Rendered decision trail
    pub summary: String,
    /// Whether every forcing point was answered or made moot
    pub complete: bool,
}

/// One graph plus its immutable forcing-point list
#[derive(Debug, Clone)]
pub struct Traversal<'g> {
    graph: &'g ClaimGraph,
    points: Vec<ForcingPoint>,
}

impl<'g> Traversal<'g> {
    /// Extract forcing points for `graph`
    pub fn new(graph: &'g ClaimGraph) -> Self {
        Self {
            graph,
            points: extract_forcing_points(graph),
        }
    }

    /// The graph this traversal runs over
    pub fn graph(&self) -> &'g ClaimGraph {
        self.graph
    }

    /// Every forcing point, in ask order
    pub fn forcing_points(&self) -> &[ForcingPoint] {
        &self.points
    }

    /// Look up a forcing point
    pub fn point(&self, id: &ForcingPointId) -> Option<&ForcingPoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    /// A fresh state for this graph
    pub fn start(&self) -> TraversalState {
        TraversalState::new(self.graph)
    }

    /// Answer a conditional point by id
    pub fn resolve_conditional(
        &self,
        state: &TraversalState,
        id: &ForcingPointId,
        satisfied: bool,
        user_input: Option<&str>,
    ) -> Result<TraversalState, TraversalError> {
        let point = self.lookup(id)?;
        engine::resolve_conditional(self.graph, state, point, satisfied, user_input)
    }

    /// Answer a conflict point by id
    pub fn resolve_conflict(
        &self,
        state: &TraversalState,
        id: &ForcingPointId,
        selected: &ClaimId,
        user_input: Option<&str>,
    ) -> Result<TraversalState, TraversalError> {
        let point = self.lookup(id)?;
        engine::resolve_conflict(self.graph, state, point, selected, user_input)
    }

    /// Answer any point, dispatching on the answer's shape
    pub fn resolve(
        &self,
        state: &TraversalState,
        id: &ForcingPointId,
        answer: &Answer,
    ) -> Result<TraversalState, TraversalError> {
        match answer {
            Answer::Condition { satisfied, input } => {
                self.resolve_conditional(state, id, *satisfied, input.as_deref())
            }
            Answer::Choice { claim, input } => {
                self.resolve_conflict(state, id, claim, input.as_deref())
            }
        }
    }

    /// Points that still need an answer, in ask order
    pub fn live_points(&self, state: &TraversalState) -> Vec<&ForcingPoint> {
        engine::get_live_forcing_points(&self.points, state)
    }

    /// Whether some upstream point of `point` still needs an answer
    pub fn is_blocked(&self, point: &ForcingPoint, state: &TraversalState) -> bool {
        point
            .blocked_by
            .iter()
            .filter_map(|id| self.point(id))
            .any(|blocker| is_live(blocker, state))
    }

    /// The next point to ask
    ///
    /// The first live point with no live blocker. If every live point is
    /// blocked (gates that depend on each other), the first live point is
    /// returned so the traversal can still finish.
    pub fn next_point(&self, state: &TraversalState) -> Option<&ForcingPoint> {
        let live = self.live_points(state);
        live.iter()
            .find(|p| !self.is_blocked(p, state))
            .or_else(|| live.first())
            .copied()
    }

    /// True once no forcing point is live
    pub fn is_complete(&self, state: &TraversalState) -> bool {
        engine::is_complete(&self.points, state)
    }

    /// Active/pruned sets and the rendered path, for synthesis
    pub fn outcome(&self, state: &TraversalState) -> TraversalOutcome {
        let outcome = TraversalOutcome {
            active: state.active_claims().cloned().collect(),
            pruned: state.pruned_claims().cloned().collect(),
            summary: build_path_summary(state),
            complete: self.is_complete(state),
        };
        tracing::info!(
            active = outcome.active.len(),
            pruned = outcome.pruned.len(),
            decisions = state.resolutions().len(),
            complete = outcome.complete,
            "traversal outcome"
        );
        outcome
    }

    fn lookup(&self, id: &ForcingPointId) -> Result<&ForcingPoint, TraversalError> {
        self.point(id)
            .ok_or_else(|| TraversalError::UnknownForcingPoint(id.clone()))
    }
}
