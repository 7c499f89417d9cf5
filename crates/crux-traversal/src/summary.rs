//! Path summary rendering

use crate::TraversalState;

/// Marker for a condition that held
pub const SATISFIED_MARKER: &str = "✓";

/// Marker for a condition that failed
pub const UNSATISFIED_MARKER: &str = "✗";

/// Marker for a conflict choice
pub const CHOICE_MARKER: &str = "→";

/// Returned when no decision has been made yet
pub const EMPTY_PATH_SUMMARY: &str = "No decisions made yet.";

/// Render the decision trail, one numbered line per resolution
///
/// # Examples
///
/// ```
/// use crux_traversal::{build_path_summary, TraversalState, EMPTY_PATH_SUMMARY};
///
/// assert_eq!(build_path_summary(&TraversalState::default()), EMPTY_PATH_SUMMARY);
/// ```
pub fn build_path_summary(state: &TraversalState) -> String {
    let steps = state.path_steps();
    if steps.is_empty() {
        return EMPTY_PATH_SUMMARY.to_string();
    }

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n")
}
