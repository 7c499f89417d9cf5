//! The immutable claim graph for one conversation turn

use crate::roles::assign_roles;
use crate::tension::{extract_tensions, Tension};
use crate::tiers::compute_tiers;
use crate::{ClaimGraphInput, Diagnostic, GraphConfig};
use crux_domain::{Claim, ClaimId, ConditionalGate, Edge, EdgeKind, GateId, Role};
use std::collections::{BTreeMap, BTreeSet};

/// Claims, edges and gates with roles, tiers and tensions derived
///
/// Built once per turn and read-only afterwards. Every collection is
/// ordered, so iteration never depends on hashing.
#[derive(Debug, Clone)]
pub struct ClaimGraph {
    claims: BTreeMap<ClaimId, Claim>,
    edges: Vec<Edge>,
    gates: Vec<ConditionalGate>,
    prerequisites: BTreeMap<ClaimId, BTreeSet<ClaimId>>,
    dependents: BTreeMap<ClaimId, BTreeSet<ClaimId>>,
    tensions: Vec<Tension>,
    cycles: Vec<Vec<ClaimId>>,
    diagnostics: Vec<Diagnostic>,
    total_perspectives: usize,
    config: GraphConfig,
}

impl ClaimGraph {
    /// Build a graph from an assembled document
    ///
    /// Never fails: unknown references are dropped and cycles are reported
    /// through [`diagnostics`](Self::diagnostics).
    ///
    /// # Examples
    ///
    /// ```
    /// use crux_domain::{ClaimType, Edge};
    /// use crux_graph::{ClaimGraph, ClaimGraphInput, ClaimInput, GraphConfig};
    ///
    /// let input = ClaimGraphInput::new(2)
    ///     .claim(ClaimInput::new("c0", "Base", ClaimType::Factual, vec![0, 1]))
    ///     .claim(ClaimInput::new("c1", "Built on base", ClaimType::Prescriptive, vec![0]))
    ///     .edge(Edge::prerequisite("c0", "c1"));
    ///
    /// let graph = ClaimGraph::build(input, GraphConfig::default());
    /// assert_eq!(graph.tier(&"c1".into()), Some(1));
    /// ```
    pub fn build(input: ClaimGraphInput, config: GraphConfig) -> Self {
        let total_perspectives = input.total_perspectives;
        let mut diagnostics = Vec::new();

        // 1. Claims, with support ratios
        let mut claims: BTreeMap<ClaimId, Claim> = BTreeMap::new();
        for claim_input in input.claims {
            if claims.contains_key(&claim_input.id) {
                diagnostics.push(Diagnostic::DuplicateClaim { claim: claim_input.id });
                continue;
            }
            let mut claim = claim_input.into_claim();
            claim.support_ratio = claim.support_count() as f64 / total_perspectives.max(1) as f64;
            claims.insert(claim.id.clone(), claim);
        }

        // 2. Edges referencing known claims only
        let mut edges = Vec::with_capacity(input.edges.len());
        for edge in input.edges {
            if edge.from == edge.to {
                diagnostics.push(Diagnostic::SelfEdge { claim: edge.from, kind: edge.kind });
            } else if !claims.contains_key(&edge.from) || !claims.contains_key(&edge.to) {
                diagnostics.push(Diagnostic::DanglingEdge {
                    from: edge.from,
                    to: edge.to,
                    kind: edge.kind,
                });
            } else {
                edges.push(edge);
            }
        }

        let mut prerequisites: BTreeMap<ClaimId, BTreeSet<ClaimId>> =
            claims.keys().map(|id| (id.clone(), BTreeSet::new())).collect();
        let mut dependents = prerequisites.clone();
        for edge in edges.iter().filter(|e| e.kind == EdgeKind::Prerequisite) {
            if let Some(set) = prerequisites.get_mut(&edge.to) {
                set.insert(edge.from.clone());
            }
            if let Some(set) = dependents.get_mut(&edge.from) {
                set.insert(edge.to.clone());
            }
        }

        // 3. Tiers
        let report = compute_tiers(&prerequisites);
        for (id, tier) in &report.tiers {
            if let Some(claim) = claims.get_mut(id) {
                claim.tier = *tier;
            }
        }
        for path in &report.cycles {
            diagnostics.push(Diagnostic::PrerequisiteCycle { path: path.clone() });
        }

        // 4. Roles
        let foundations: BTreeSet<ClaimId> = dependents
            .iter()
            .filter(|(_, deps)| !deps.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        let roles = assign_roles(&claims, &edges, &foundations, &config);
        for (id, role) in roles {
            if let Some(claim) = claims.get_mut(&id) {
                claim.role = role;
            }
        }

        // 5. Gates
        let gates = sanitize_gates(input.gates, &claims, &mut diagnostics);

        // 6. Tensions
        let tensions = extract_tensions(&edges, &report.tiers);

        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "claim graph data-quality issue");
        }
        tracing::info!(
            claims = claims.len(),
            edges = edges.len(),
            gates = gates.len(),
            tensions = tensions.len(),
            cycles = report.cycles.len(),
            "claim graph built"
        );

        Self {
            claims,
            edges,
            gates,
            prerequisites,
            dependents,
            tensions,
            cycles: report.cycles,
            diagnostics,
            total_perspectives,
            config,
        }
    }

    /// Look up a claim
    pub fn claim(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.get(id)
    }

    /// Whether the graph contains a claim
    pub fn contains(&self, id: &ClaimId) -> bool {
        self.claims.contains_key(id)
    }

    /// All claims in lexical id order
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// All claim ids in lexical order
    pub fn claim_ids(&self) -> impl Iterator<Item = &ClaimId> {
        self.claims.keys()
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the graph has no claims
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Surviving edges in input order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Surviving gates in input order
    pub fn gates(&self) -> &[ConditionalGate] {
        &self.gates
    }

    /// Look up a gate
    pub fn gate(&self, id: &GateId) -> Option<&ConditionalGate> {
        self.gates.iter().find(|g| &g.id == id)
    }

    /// Tier of a claim
    pub fn tier(&self, id: &ClaimId) -> Option<usize> {
        self.claims.get(id).map(|c| c.tier)
    }

    /// Role of a claim
    pub fn role(&self, id: &ClaimId) -> Option<Role> {
        self.claims.get(id).map(|c| c.role)
    }

    /// Support ratio of a claim
    pub fn support_ratio(&self, id: &ClaimId) -> Option<f64> {
        self.claims.get(id).map(|c| c.support_ratio)
    }

    /// Claims that must hold before `id` is viable, sorted
    pub fn prerequisites_of(&self, id: &ClaimId) -> impl Iterator<Item = &ClaimId> {
        self.prerequisites.get(id).into_iter().flatten()
    }

    /// Claims that list `id` as a prerequisite, sorted
    pub fn dependents_of(&self, id: &ClaimId) -> impl Iterator<Item = &ClaimId> {
        self.dependents.get(id).into_iter().flatten()
    }

    /// Whether some claim depends on `id`
    pub fn is_foundation(&self, id: &ClaimId) -> bool {
        self.dependents.get(id).is_some_and(|d| !d.is_empty())
    }

    /// Deduplicated conflict pairs
    pub fn tensions(&self) -> &[Tension] {
        &self.tensions
    }

    /// Prerequisite cycles found while ranking tiers
    pub fn cycles(&self) -> &[Vec<ClaimId>] {
        &self.cycles
    }

    /// Every data-quality issue found during the build
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of perspectives the support ratios are relative to
    pub fn total_perspectives(&self) -> usize {
        self.total_perspectives
    }

    /// Configuration the roles were assigned with
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

fn sanitize_gates(
    gates: Vec<ConditionalGate>,
    claims: &BTreeMap<ClaimId, Claim>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ConditionalGate> {
    let mut seen: BTreeSet<GateId> = BTreeSet::new();
    let mut kept = Vec::with_capacity(gates.len());

    for mut gate in gates {
        if !seen.insert(gate.id.clone()) {
            diagnostics.push(Diagnostic::DuplicateGate { gate: gate.id });
            continue;
        }

        let mut unique: BTreeSet<ClaimId> = BTreeSet::new();
        let mut affected = Vec::with_capacity(gate.affected_claims.len());
        for claim in gate.affected_claims.drain(..) {
            if !claims.contains_key(&claim) {
                diagnostics.push(Diagnostic::UnknownGateClaim {
                    gate: gate.id.clone(),
                    claim,
                });
            } else if unique.insert(claim.clone()) {
                affected.push(claim);
            }
        }

        if affected.is_empty() {
            diagnostics.push(Diagnostic::EmptyGate { gate: gate.id });
            continue;
        }
        gate.affected_claims = affected;
        kept.push(gate);
    }

    // Dependencies can only be checked once every gate id is known
    let known: BTreeSet<GateId> = kept.iter().map(|g| g.id.clone()).collect();
    for gate in &mut kept {
        let mut unique: BTreeSet<GateId> = BTreeSet::new();
        let mut depends_on = Vec::with_capacity(gate.depends_on.len());
        for dep in gate.depends_on.drain(..) {
            if dep == gate.id || !known.contains(&dep) {
                diagnostics.push(Diagnostic::UnknownGateDependency {
                    gate: gate.id.clone(),
                    depends_on: dep,
                });
            } else if unique.insert(dep.clone()) {
                depends_on.push(dep);
            }
        }
        gate.depends_on = depends_on;
    }

    kept
}
