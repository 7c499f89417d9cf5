//! Traversal error types

use crate::{ForcingPointId, ForcingPointKind};
use crux_domain::ClaimId;
use thiserror::Error;

/// Caller contract violations
///
/// Each of these means the caller's view of the traversal has drifted from
/// the engine's, so none of them are ever silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// The forcing point already has a resolution in this state
    #[error("Forcing point '{0}' is already resolved")]
    AlreadyResolved(ForcingPointId),

    /// The selected claim is not one of the conflict's options
    #[error("Claim '{claim}' is not an option of forcing point '{forcing_point}'")]
    UnknownOption {
        /// The conflict point
        forcing_point: ForcingPointId,
        /// The rejected selection
        claim: ClaimId,
    },

    /// A conditional answer was given to a conflict point, or vice versa
    #[error("Forcing point '{forcing_point}' is a {actual} point, not a {expected} point")]
    KindMismatch {
        /// The forcing point
        forcing_point: ForcingPointId,
        /// Kind the operation needs
        expected: ForcingPointKind,
        /// Kind the point has
        actual: ForcingPointKind,
    },

    /// No forcing point with this id exists in the traversal
    #[error("Unknown forcing point: {0}")]
    UnknownForcingPoint(ForcingPointId),
}
