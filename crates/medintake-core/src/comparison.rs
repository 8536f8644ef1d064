//! Plan comparison inputs and ranked results.

use serde::{Deserialize, Serialize};

use crate::catalog::Plan;

/// Client geography and flags supplied by the client-record service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub state: String,
    pub county: String,
    /// Carried through to snapshots; no scoring rule reads it.
    #[serde(default)]
    pub uses_restricted_network: bool,
}

/// An alternative plan with its additive score and the reasons that built it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonCandidate {
    pub plan: Plan,
    /// Unbounded relative score (base 100); compare, don't normalise.
    pub score: i32,
    /// Justifications in the order the scoring rules fired.
    pub reasons: Vec<String>,
}

/// Ranked recommendations against a client's current plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComparisonResult {
    pub current_plan: Plan,
    /// Best first, at most three.
    pub recommendations: Vec<ComparisonCandidate>,
    /// Catalog plans that passed the state/county/self-exclusion filter.
    pub candidates_considered: usize,
}

impl ScoredComparisonResult {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
