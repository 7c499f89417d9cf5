//! Tier computation and prerequisite cycle detection
//!
//! `tier(c) = 0` when `c` has no prerequisites, otherwise
//! `1 + max(tier(p))` over its prerequisites. The walk is an iterative
//! depth-first search with three-colour marking, so deep chains cannot
//! overflow the call stack and cyclic input still terminates.

use crux_domain::ClaimId;
use std::collections::{BTreeMap, BTreeSet};

/// Result of a tier computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierReport {
    /// Tier of every claim
    pub tiers: BTreeMap<ClaimId, usize>,

    /// Detected cycles, each from the first occurrence to the repeat inclusive
    pub cycles: Vec<Vec<ClaimId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next_dep: usize,
    tier: usize,
}

/// Compute tiers from a `claim -> prerequisites` map
///
/// Every claim must appear as a key. Prerequisites that are not keys are
/// ignored. Claims on a detected cycle get tier 0; claims depending on them
/// are ranked normally above it.
pub fn compute_tiers(prerequisites: &BTreeMap<ClaimId, BTreeSet<ClaimId>>) -> TierReport {
    let ids: Vec<&ClaimId> = prerequisites.keys().collect();
    let index: BTreeMap<&ClaimId, usize> =
        ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let deps: Vec<Vec<usize>> = prerequisites
        .values()
        .map(|set| set.iter().filter_map(|dep| index.get(dep).copied()).collect())
        .collect();

    let n = ids.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut tiers = vec![0usize; n];
    let mut on_cycle = vec![false; n];
    let mut cycles = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        let mut stack = vec![Frame { node: root, next_dep: 0, tier: 0 }];

        while let Some(&Frame { node, next_dep, tier }) = stack.last() {
            let top = stack.len() - 1;

            if let Some(&dep) = deps[node].get(next_dep) {
                stack[top].next_dep += 1;
                match marks[dep] {
                    Mark::Unvisited => {
                        marks[dep] = Mark::InProgress;
                        stack.push(Frame { node: dep, next_dep: 0, tier: 0 });
                    }
                    Mark::InProgress => {
                        if let Some(start) = stack.iter().position(|f| f.node == dep) {
                            let mut path: Vec<ClaimId> =
                                stack[start..].iter().map(|f| ids[f.node].clone()).collect();
                            path.push(ids[dep].clone());
                            for frame in &stack[start..] {
                                on_cycle[frame.node] = true;
                            }
                            tracing::debug!(cycle = ?path, "prerequisite cycle detected");
                            cycles.push(path);
                        }
                    }
                    Mark::Done => {
                        stack[top].tier = tier.max(tiers[dep] + 1);
                    }
                }
                continue;
            }

            stack.pop();
            let resolved = if on_cycle[node] { 0 } else { tier };
            tiers[node] = resolved;
            marks[node] = Mark::Done;
            if let Some(parent) = stack.last_mut() {
                parent.tier = parent.tier.max(resolved + 1);
            }
        }
    }

    TierReport {
        tiers: ids.into_iter().cloned().zip(tiers).collect(),
        cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)], nodes: &[&str]) -> BTreeMap<ClaimId, BTreeSet<ClaimId>> {
        let mut map: BTreeMap<ClaimId, BTreeSet<ClaimId>> =
            nodes.iter().map(|n| (ClaimId::new(*n), BTreeSet::new())).collect();
        // (prerequisite, dependent)
        for (from, to) in edges {
            map.entry(ClaimId::new(*to)).or_default().insert(ClaimId::new(*from));
        }
        map
    }

    fn tier(report: &TierReport, id: &str) -> usize {
        report.tiers[&ClaimId::new(id)]
    }

    #[test]
    fn test_chain_tiers() {
        let report = compute_tiers(&graph(&[("a", "b"), ("b", "c")], &["a", "b", "c"]));
        assert_eq!(tier(&report, "a"), 0);
        assert_eq!(tier(&report, "b"), 1);
        assert_eq!(tier(&report, "c"), 2);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn test_diamond_takes_longest_path() {
        // a -> b -> d, a -> d, c -> d
        let report = compute_tiers(&graph(
            &[("a", "b"), ("b", "d"), ("a", "d"), ("c", "d")],
            &["a", "b", "c", "d"],
        ));
        assert_eq!(tier(&report, "d"), 2);
        assert_eq!(tier(&report, "c"), 0);
    }

    #[test]
    fn test_two_cycle_resolves_to_zero() {
        let report = compute_tiers(&graph(&[("c0", "c1"), ("c1", "c0")], &["c0", "c1"]));
        assert_eq!(tier(&report, "c0"), 0);
        assert_eq!(tier(&report, "c1"), 0);
        assert_eq!(report.cycles.len(), 1);
        let path: Vec<&str> = report.cycles[0].iter().map(|c| c.as_str()).collect();
        assert_eq!(path, vec!["c0", "c1", "c0"]);
    }

    #[test]
    fn test_dependent_of_cycle_is_ranked_above_it() {
        // x depends on a member of the a <-> b cycle
        let report = compute_tiers(&graph(&[("a", "b"), ("b", "a"), ("b", "x")], &["a", "b", "x"]));
        assert_eq!(tier(&report, "a"), 0);
        assert_eq!(tier(&report, "b"), 0);
        assert_eq!(tier(&report, "x"), 1);
    }

    #[test]
    fn test_unknown_prerequisite_ignored() {
        let mut map = graph(&[], &["a"]);
        map.get_mut(&ClaimId::new("a")).unwrap().insert(ClaimId::new("ghost"));
        let report = compute_tiers(&map);
        assert_eq!(tier(&report, "a"), 0);
        assert_eq!(report.tiers.len(), 1);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..20_000).map(|i| format!("n{:05}", i)).collect();
        let mut map: BTreeMap<ClaimId, BTreeSet<ClaimId>> = BTreeMap::new();
        for (i, name) in names.iter().enumerate() {
            let deps = if i == 0 {
                BTreeSet::new()
            } else {
                BTreeSet::from([ClaimId::new(names[i - 1].clone())])
            };
            map.insert(ClaimId::new(name.clone()), deps);
        }
        let report = compute_tiers(&map);
        assert_eq!(report.tiers[&ClaimId::new("n19999")], 19_999);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every claim gets a tier, bounded by the claim count, on arbitrary graphs
        #[test]
        fn test_tiers_total_on_arbitrary_graphs(
            edges in prop::collection::vec((0usize..12, 0usize..12), 0..40)
        ) {
            let mut map: BTreeMap<ClaimId, BTreeSet<ClaimId>> =
                (0..12).map(|i| (ClaimId::new(format!("c{:02}", i)), BTreeSet::new())).collect();
            for (from, to) in &edges {
                map.get_mut(&ClaimId::new(format!("c{:02}", to)))
                    .unwrap()
                    .insert(ClaimId::new(format!("c{:02}", from)));
            }

            let report = compute_tiers(&map);
            prop_assert_eq!(report.tiers.len(), 12);
            for tier in report.tiers.values() {
                prop_assert!(*tier < 12);
            }
            for cycle in &report.cycles {
                prop_assert!(cycle.len() >= 2);
                prop_assert_eq!(cycle.first(), cycle.last());
            }

            // Deterministic
            prop_assert_eq!(compute_tiers(&map), report);
        }
    }
}
