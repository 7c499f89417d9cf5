//! Anchor/challenger role assignment from support data

use crate::GraphConfig;
use crux_domain::{Claim, ClaimId, Edge, EdgeKind, Role};
use std::collections::{BTreeMap, BTreeSet};

/// Assign a role to every claim
///
/// Each unordered conflict pair is considered once, in edge order. When the
/// support ratios differ by at least `support_delta_threshold`, the weaker side
/// becomes a challenger, provided the stronger side is a foundation (has
/// dependents) or high-support. Otherwise either side that is a foundation or
/// high-support is confirmed as anchor. A challenger is never turned back
/// into an anchor.
pub fn assign_roles(
    claims: &BTreeMap<ClaimId, Claim>,
    edges: &[Edge],
    foundations: &BTreeSet<ClaimId>,
    config: &GraphConfig,
) -> BTreeMap<ClaimId, Role> {
    let mut roles: BTreeMap<ClaimId, Role> =
        claims.keys().map(|id| (id.clone(), Role::Anchor)).collect();
    let mut seen: BTreeSet<(&ClaimId, &ClaimId)> = BTreeSet::new();

    for edge in edges.iter().filter(|e| e.kind == EdgeKind::Conflict) {
        let pair = edge.sorted_pair();
        if !seen.insert(pair) {
            continue;
        }
        let (Some(a), Some(b)) = (claims.get(pair.0), claims.get(pair.1)) else {
            continue;
        };

        let strong = |claim: &Claim| {
            foundations.contains(&claim.id) || claim.support_ratio >= config.high_support_threshold
        };

        let delta = (a.support_ratio - b.support_ratio).abs();
        if delta >= config.support_delta_threshold {
            let (higher, lower) = if a.support_ratio > b.support_ratio { (a, b) } else { (b, a) };
            if strong(higher) {
                tracing::debug!(
                    challenger = %lower.id,
                    anchor = %higher.id,
                    delta,
                    "demoting weaker side of conflict"
                );
                roles.insert(lower.id.clone(), Role::Challenger);
            }
        } else {
            for side in [a, b] {
                if strong(side) {
                    if let Some(role) = roles.get_mut(&side.id) {
                        if *role != Role::Challenger {
                            *role = Role::Anchor;
                        }
                    }
                }
            }
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crux_domain::ClaimType;

    fn claim(id: &str, ratio: f64) -> (ClaimId, Claim) {
        let mut claim = Claim::new(id, id, id, ClaimType::Factual, vec![]);
        claim.support_ratio = ratio;
        (claim.id.clone(), claim)
    }

    fn role(roles: &BTreeMap<ClaimId, Role>, id: &str) -> Role {
        roles[&ClaimId::new(id)]
    }

    #[test]
    fn test_large_gap_demotes_weaker_side() {
        let claims = BTreeMap::from([claim("a", 0.8), claim("b", 0.2)]);
        let edges = vec![Edge::conflict("b", "a")];
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &GraphConfig::default());
        assert_eq!(role(&roles, "a"), Role::Anchor);
        assert_eq!(role(&roles, "b"), Role::Challenger);
    }

    #[test]
    fn test_weak_stronger_side_blocks_demotion() {
        // 0.2 vs 0.0: gap is large but the stronger side is neither high-support nor a foundation
        let claims = BTreeMap::from([claim("a", 0.2), claim("b", 0.0)]);
        let edges = vec![Edge::conflict("a", "b")];
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &GraphConfig::default());
        assert_eq!(role(&roles, "b"), Role::Anchor);
    }

    #[test]
    fn test_foundation_enables_demotion() {
        let claims = BTreeMap::from([claim("a", 0.2), claim("b", 0.0)]);
        let edges = vec![Edge::conflict("a", "b")];
        let foundations = BTreeSet::from([ClaimId::new("a")]);
        let roles = assign_roles(&claims, &edges, &foundations, &GraphConfig::default());
        assert_eq!(role(&roles, "b"), Role::Challenger);
    }

    #[test]
    fn test_small_gap_keeps_both_anchors() {
        let claims = BTreeMap::from([claim("a", 0.5), claim("b", 0.45)]);
        let edges = vec![Edge::conflict("a", "b")];
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &GraphConfig::default());
        assert_eq!(role(&roles, "a"), Role::Anchor);
        assert_eq!(role(&roles, "b"), Role::Anchor);
    }

    #[test]
    fn test_challenger_is_never_reconfirmed() {
        // b loses to a, then ties with c; it must stay a challenger
        let claims = BTreeMap::from([claim("a", 1.0), claim("b", 0.5), claim("c", 0.5)]);
        let edges = vec![Edge::conflict("a", "b"), Edge::conflict("b", "c")];
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &GraphConfig::default());
        assert_eq!(role(&roles, "b"), Role::Challenger);
        assert_eq!(role(&roles, "c"), Role::Anchor);
    }

    #[test]
    fn test_duplicate_pair_processed_once() {
        let claims = BTreeMap::from([claim("a", 0.9), claim("b", 0.1)]);
        let edges = vec![Edge::conflict("a", "b"), Edge::conflict("b", "a")];
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &GraphConfig::default());
        assert_eq!(role(&roles, "a"), Role::Anchor);
        assert_eq!(role(&roles, "b"), Role::Challenger);
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let claims = BTreeMap::from([claim("a", 0.9), claim("b", 0.1)]);
        let edges = vec![Edge::conflict("a", "b")];
        let config = GraphConfig {
            support_delta_threshold: 0.95,
            ..GraphConfig::default()
        };
        let roles = assign_roles(&claims, &edges, &BTreeSet::new(), &config);
        assert_eq!(role(&roles, "b"), Role::Anchor);
    }
}
