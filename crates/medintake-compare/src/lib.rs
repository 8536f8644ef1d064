//! Plan comparison and recommendation.
//!
//! Given a client's current plan, state and county, and a catalog of plans,
//! ranks up to three eligible alternatives by an additive score with a
//! human-readable reason for every point awarded.

pub mod filter;
pub mod scoring;

pub use filter::{eligible_plans, is_eligible};
pub use scoring::{MOOP_SENTINEL, format_dollars, score_candidate};

use medintake_core::{ClientProfile, Plan, ScoredComparisonResult};
use tracing::info;

/// Recommendations returned per comparison.
pub const TOP_N: usize = 3;

/// Rank eligible alternatives to `current` for `client`, best first.
///
/// Ties keep catalog order. The current plan never appears in the result.
pub fn compare_plans(
    current: &Plan,
    client: &ClientProfile,
    catalog: &[Plan],
) -> ScoredComparisonResult {
    let eligible = eligible_plans(catalog, client, current.id);
    let candidates_considered = eligible.len();

    let mut scored: Vec<_> = eligible
        .into_iter()
        .map(|candidate| score_candidate(current, candidate))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(TOP_N);

    info!(
        current_plan = current.id,
        state = %client.state,
        county = %client.county,
        considered = candidates_considered,
        recommended = scored.len(),
        "compared plans"
    );

    ScoredComparisonResult {
        current_plan: current.clone(),
        recommendations: scored,
        candidates_considered,
    }
}
