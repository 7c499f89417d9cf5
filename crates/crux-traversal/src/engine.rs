//! Traversal state machine
//!
//! Every operation is a pure function from `(state, action)` to a new state.
//! Pruning cascades breadth-first along prerequisite edges until the full
//! transitive closure of dependents is gone.

use crate::summary::{CHOICE_MARKER, SATISFIED_MARKER, UNSATISFIED_MARKER};
use crate::{
    ForcingPoint, ForcingPointKind, Resolution, ResolutionOutcome, TraversalError, TraversalState,
};
use crux_domain::ClaimId;
use crux_graph::ClaimGraph;
use std::collections::VecDeque;

/// Answer a conditional point
///
/// When `satisfied` is false every affected claim is pruned, and so is
/// everything that transitively depends on them.
pub fn resolve_conditional(
    graph: &ClaimGraph,
    state: &TraversalState,
    point: &ForcingPoint,
    satisfied: bool,
    user_input: Option<&str>,
) -> Result<TraversalState, TraversalError> {
    expect_kind(point, ForcingPointKind::Conditional)?;
    ensure_unresolved(state, point)?;

    let mut next = state.clone();
    let condition = point.condition.as_deref().unwrap_or(&point.question);

    let step = if satisfied {
        format!("{} {}", SATISFIED_MARKER, condition)
    } else {
        let direct: Vec<ClaimId> = point
            .affected_claims()
            .iter()
            .filter(|id| next.is_active(id))
            .cloned()
            .collect();
        let pruned = prune_with_cascade(graph, &mut next, &direct);
        let mut step = format!("{} {}", UNSATISFIED_MARKER, condition);
        if !direct.is_empty() {
            step.push_str(&format!(": set aside {}", labels(graph, &direct)));
        }
        let cascaded = pruned.len().saturating_sub(direct.len());
        if cascaded > 0 {
            step.push_str(&format!(" (+{} dependent)", cascaded));
        }
        step
    };
    let step = with_input(step, user_input);

    tracing::debug!(
        forcing_point = %point.id,
        satisfied,
        pruned = next.pruned_claims().count(),
        "conditional resolved"
    );

    next.record(
        Resolution {
            forcing_point_id: point.id.clone(),
            outcome: ResolutionOutcome::Conditional { satisfied },
            free_text_input: user_input.map(str::to_string),
        },
        step,
    );
    Ok(next)
}

/// Answer a conflict point by keeping `selected`
///
/// Every other option is pruned, with cascade. If `selected` itself rests on
/// a rejected option it is pruned too, and the path step names it.
pub fn resolve_conflict(
    graph: &ClaimGraph,
    state: &TraversalState,
    point: &ForcingPoint,
    selected: &ClaimId,
    user_input: Option<&str>,
) -> Result<TraversalState, TraversalError> {
    expect_kind(point, ForcingPointKind::Conflict)?;
    ensure_unresolved(state, point)?;
    if !point.has_option(selected) {
        return Err(TraversalError::UnknownOption {
            forcing_point: point.id.clone(),
            claim: selected.clone(),
        });
    }

    let mut next = state.clone();
    let rejected: Vec<ClaimId> = point
        .options()
        .iter()
        .map(|o| o.claim_id.clone())
        .filter(|id| id != selected)
        .collect();
    let pruned = prune_with_cascade(graph, &mut next, &rejected);

    let mut step = format!(
        "{} {} over {}",
        CHOICE_MARKER,
        labels(graph, std::slice::from_ref(selected)),
        labels(graph, &rejected)
    );
    let cascaded = pruned.len().saturating_sub(rejected.len());
    let selected_lost = pruned.contains(selected);
    if selected_lost {
        step.push_str(&format!(
            " (+{} dependent, including {})",
            cascaded,
            labels(graph, std::slice::from_ref(selected))
        ));
        tracing::info!(
            forcing_point = %point.id,
            selected = %selected,
            "selected claim rests on a rejected option and was pruned"
        );
    } else if cascaded > 0 {
        step.push_str(&format!(" (+{} dependent)", cascaded));
    }
    let step = with_input(step, user_input);

    tracing::debug!(
        forcing_point = %point.id,
        selected = %selected,
        pruned = pruned.len(),
        "conflict resolved"
    );

    next.record(
        Resolution {
            forcing_point_id: point.id.clone(),
            outcome: ResolutionOutcome::Conflict {
                selected_claim_id: selected.clone(),
            },
            free_text_input: user_input.map(str::to_string),
        },
        step,
    );
    Ok(next)
}

/// Forcing points that still need an answer
///
/// Excludes resolved points, conditionals with no active affected claim, and
/// conflicts with fewer than two active options.
pub fn get_live_forcing_points<'p>(
    points: &'p [ForcingPoint],
    state: &TraversalState,
) -> Vec<&'p ForcingPoint> {
    points.iter().filter(|p| is_live(p, state)).collect()
}

/// Whether one forcing point still needs an answer
pub fn is_live(point: &ForcingPoint, state: &TraversalState) -> bool {
    if state.is_resolved(&point.id) {
        return false;
    }
    match point.kind() {
        ForcingPointKind::Conditional => point.affected_claims().iter().any(|c| state.is_active(c)),
        ForcingPointKind::Conflict => {
            point
                .options()
                .iter()
                .filter(|o| state.is_active(&o.claim_id))
                .count()
                >= 2
        }
    }
}

/// True once no forcing point is live
pub fn is_complete(points: &[ForcingPoint], state: &TraversalState) -> bool {
    !points.iter().any(|p| is_live(p, state))
}

/// Prune `seeds` and every active claim that transitively depends on them
///
/// Returns the newly pruned claims in the order they were pruned. Seeds that
/// are already pruned are skipped: their dependents were handled when they
/// were pruned.
pub(crate) fn prune_with_cascade(
    graph: &ClaimGraph,
    state: &mut TraversalState,
    seeds: &[ClaimId],
) -> Vec<ClaimId> {
    let mut pruned = Vec::new();
    let mut queue: VecDeque<ClaimId> = VecDeque::new();

    for seed in seeds {
        if state.prune(seed) {
            pruned.push(seed.clone());
            queue.push_back(seed.clone());
        }
    }

    while let Some(id) = queue.pop_front() {
        for dependent in graph.dependents_of(&id) {
            if state.prune(dependent) {
                tracing::debug!(claim = %dependent, via = %id, "cascade prune");
                pruned.push(dependent.clone());
                queue.push_back(dependent.clone());
            }
        }
    }

    pruned
}

fn expect_kind(point: &ForcingPoint, expected: ForcingPointKind) -> Result<(), TraversalError> {
    let actual = point.kind();
    if actual != expected {
        return Err(TraversalError::KindMismatch {
            forcing_point: point.id.clone(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn ensure_unresolved(state: &TraversalState, point: &ForcingPoint) -> Result<(), TraversalError> {
    if state.is_resolved(&point.id) {
        return Err(TraversalError::AlreadyResolved(point.id.clone()));
    }
    Ok(())
}

fn labels(graph: &ClaimGraph, ids: &[ClaimId]) -> String {
    ids.iter()
        .map(|id| graph.claim(id).map_or(id.as_str(), |c| c.label.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_input(mut step: String, user_input: Option<&str>) -> String {
    if let Some(input) = user_input.map(str::trim).filter(|s| !s.is_empty()) {
        step.push_str(&format!(" [\"{}\"]", input));
    }
    step
}
