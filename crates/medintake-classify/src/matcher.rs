//! Fuzzy carrier and plan matching against the catalog.
//!
//! All scoring runs over normalised text (uppercased, whitespace collapsed):
//!
//! - Carrier: 100 when the full name appears, otherwise the share of the
//!   name's words (longer than two characters) that appear, scaled to 100.
//! - Plan: 100 when a CMS plan identifier (`H1234-001`, `S5678-002`) found in
//!   the text also appears in the plan name, 90 when the full name appears,
//!   otherwise word overlap scaled to 80.
//!
//! A plan owned by the already-matched carrier gets a small bonus in the
//! ranking order only; its reported score is unchanged.

use regex::Regex;
use tracing::debug;

use medintake_core::{Carrier, CarrierCandidate, Catalog, Plan, PlanCandidate};

use crate::ClassifyError;

pub const CARRIER_MATCH_THRESHOLD: f64 = 50.0;
pub const PLAN_MATCH_THRESHOLD: f64 = 40.0;

pub const PLAN_ID_SCORE: f64 = 100.0;
pub const PLAN_NAME_SCORE: f64 = 90.0;
pub const PLAN_OVERLAP_MAX: f64 = 80.0;

/// Ranking bonus for plans of the matched carrier.
pub const CARRIER_AFFINITY_MARGIN: f64 = 5.0;

const PLAN_ID_PATTERN: &str = r"\b[HS]\d{4}-\d{3}\b";

/// Ranked candidates plus the carrier/plan that cleared their thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub carrier_candidates: Vec<CarrierCandidate>,
    pub plan_candidates: Vec<PlanCandidate>,
    pub carrier: Option<CarrierCandidate>,
    /// Best plan above threshold; may belong to another carrier.
    pub plan: Option<PlanCandidate>,
    pub confidence: f64,
}

impl CatalogMatch {
    /// Carrier and plan both matched and the plan belongs to the carrier.
    pub fn is_consistent(&self) -> bool {
        match (&self.carrier, &self.plan) {
            (Some(c), Some(p)) => p.plan.carrier_id == c.carrier.id,
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct CatalogMatcher {
    plan_id: Regex,
}

impl CatalogMatcher {
    pub fn new() -> Result<Self, ClassifyError> {
        let plan_id = Regex::new(PLAN_ID_PATTERN).map_err(|source| ClassifyError::InvalidPattern {
            field: "plan_id".into(),
            source,
        })?;
        Ok(Self { plan_id })
    }

    /// CMS plan identifiers in normalised text, in order of appearance.
    pub fn plan_ids(&self, normalized: &str) -> Vec<String> {
        self.plan_id
            .find_iter(normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Score and rank `catalog` against normalised text.
    pub fn match_catalog(&self, normalized: &str, catalog: &Catalog) -> CatalogMatch {
        let carrier_candidates = rank_carriers(normalized, &catalog.carriers);
        let carrier = carrier_candidates
            .first()
            .filter(|c| c.score >= CARRIER_MATCH_THRESHOLD)
            .cloned();

        let ids = self.plan_ids(normalized);
        let plan_candidates = rank_plans(
            normalized,
            &ids,
            &catalog.plans,
            carrier.as_ref().map(|c| c.carrier.id),
        );
        let plan = plan_candidates
            .iter()
            .find(|p| p.score >= PLAN_MATCH_THRESHOLD)
            .cloned();

        let confidence = confidence(
            carrier.as_ref(),
            plan.as_ref(),
            top_score(carrier_candidates.iter().map(|c| c.score)),
            top_score(plan_candidates.iter().map(|p| p.score)),
        );
        debug!(
            carrier = carrier.as_ref().map(|c| c.carrier.name.as_str()),
            plan = plan.as_ref().map(|p| p.plan.name.as_str()),
            plan_ids = ids.len(),
            confidence,
            "catalog match"
        );

        CatalogMatch {
            carrier_candidates,
            plan_candidates,
            carrier,
            plan,
            confidence,
        }
    }
}

// ── Scoring ──

/// Carrier score (0–100) against normalised text.
pub fn carrier_score(name: &str, normalized: &str) -> f64 {
    let name = normalize_name(name);
    if name.is_empty() {
        return 0.0;
    }
    if normalized.contains(&name) {
        return 100.0;
    }
    word_overlap(&name, normalized) * 100.0
}

/// Plan score (0–100) against normalised text and the plan IDs found in it.
pub fn plan_score(name: &str, normalized: &str, plan_ids: &[String]) -> f64 {
    let name = normalize_name(name);
    if name.is_empty() {
        return 0.0;
    }
    if plan_ids.iter().any(|id| name.contains(id.as_str())) {
        return PLAN_ID_SCORE;
    }
    if normalized.contains(&name) {
        return PLAN_NAME_SCORE;
    }
    word_overlap(&name, normalized) * PLAN_OVERLAP_MAX
}

/// Fraction (0–1) of the name's significant words present in the text.
fn word_overlap(name: &str, normalized: &str) -> f64 {
    let words: Vec<&str> = name
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words.iter().filter(|w| normalized.contains(**w)).count();
    hits as f64 / words.len() as f64
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Overall match confidence (0–100).
///
/// Agreeing carrier and plan average their scores and a plan from another
/// carrier keeps 70% of the average. A lone match keeps 60% of the higher of
/// `best_carrier` and `best_plan`, the top raw scores whether or not they
/// cleared their thresholds.
pub fn confidence(
    carrier: Option<&CarrierCandidate>,
    plan: Option<&PlanCandidate>,
    best_carrier: f64,
    best_plan: f64,
) -> f64 {
    let value = match (carrier, plan) {
        (Some(c), Some(p)) => {
            let avg = (c.score + p.score) / 2.0;
            if p.plan.carrier_id == c.carrier.id {
                avg
            } else {
                avg * 0.7
            }
        }
        (Some(c), None) => c.score.max(best_plan) * 0.6,
        (None, Some(p)) => p.score.max(best_carrier) * 0.6,
        (None, None) => 0.0,
    };
    value.clamp(0.0, 100.0)
}

fn top_score(scores: impl Iterator<Item = f64>) -> f64 {
    scores.fold(0.0, f64::max)
}

// ── Ranking ──

/// Every carrier scored, best first; ties keep catalog order.
pub fn rank_carriers(normalized: &str, carriers: &[Carrier]) -> Vec<CarrierCandidate> {
    let mut ranked: Vec<CarrierCandidate> = carriers
        .iter()
        .map(|carrier| CarrierCandidate {
            score: carrier_score(&carrier.name, normalized),
            carrier: carrier.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Every plan scored, best first.
///
/// Plans of `matched_carrier` rank as if they scored
/// [`CARRIER_AFFINITY_MARGIN`] higher; ties keep catalog order.
pub fn rank_plans(
    normalized: &str,
    plan_ids: &[String],
    plans: &[Plan],
    matched_carrier: Option<i64>,
) -> Vec<PlanCandidate> {
    let mut ranked: Vec<PlanCandidate> = plans
        .iter()
        .map(|plan| PlanCandidate {
            score: plan_score(&plan.name, normalized, plan_ids),
            carrier_affinity: matched_carrier == Some(plan.carrier_id),
            plan: plan.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| ranking_key(b).total_cmp(&ranking_key(a)));
    ranked
}

fn ranking_key(candidate: &PlanCandidate) -> f64 {
    if candidate.carrier_affinity {
        candidate.score + CARRIER_AFFINITY_MARGIN
    } else {
        candidate.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctype::search_text;

    fn carrier(id: i64, name: &str) -> Carrier {
        Carrier {
            id,
            name: name.into(),
        }
    }

    fn plan(id: i64, carrier_id: i64, name: &str) -> Plan {
        Plan {
            id,
            carrier_id,
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn carrier_full_name_and_partial_overlap() {
        let text = search_text("Welcome from Evergreen Health Partners");
        assert_eq!(carrier_score("Evergreen Health Partners", &text), 100.0);
        // EVERGREEN present, MUTUAL absent
        assert_eq!(carrier_score("Evergreen Mutual", &text), 50.0);
        assert_eq!(carrier_score("Cascade Care", &text), 0.0);
        assert_eq!(carrier_score("   ", &text), 0.0);
    }

    #[test]
    fn short_words_do_not_count() {
        let text = search_text("AB plan");
        // only "Cares" is significant and it is missing
        assert_eq!(carrier_score("AB Cares", &text), 0.0);
        assert_eq!(carrier_score("AB", &text), 100.0);
    }

    #[test]
    fn plan_id_beats_name() {
        let text = search_text("Contract H1234-001 Summary");
        let ids = vec!["H1234-001".to_string()];
        assert_eq!(plan_score("Gold Plus (HMO) H1234-001", &text, &ids), 100.0);
        assert_eq!(plan_score("Gold Plus (HMO) H1234-002", &text, &ids), 0.0);
    }

    #[test]
    fn plan_name_and_overlap_scores() {
        let text = search_text("Evergreen Gold Plus HMO benefits");
        assert_eq!(plan_score("Gold Plus HMO", &text, &[]), 90.0);
        // GOLD present; SILVER, PPO absent
        let partial = plan_score("Silver Gold PPO", &text, &[]);
        assert!((partial - 80.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn plan_ids_extracted_in_order() {
        let m = CatalogMatcher::new().unwrap();
        let ids = m.plan_ids(&search_text("see h1234-001 and S5678-010, not X1234-001"));
        assert_eq!(ids, vec!["H1234-001", "S5678-010"]);
    }

    #[test]
    fn confidence_rules() {
        let c = CarrierCandidate {
            carrier: carrier(1, "A"),
            score: 100.0,
        };
        let own = PlanCandidate {
            plan: plan(10, 1, "P"),
            score: 80.0,
            carrier_affinity: true,
        };
        let foreign = PlanCandidate {
            plan: plan(20, 2, "Q"),
            score: 80.0,
            carrier_affinity: false,
        };
        assert_eq!(confidence(Some(&c), Some(&own), 100.0, 80.0), 90.0);
        assert!((confidence(Some(&c), Some(&foreign), 100.0, 80.0) - 63.0).abs() < 1e-9);
        assert!((confidence(Some(&c), None, 100.0, 30.0) - 60.0).abs() < 1e-9);
        assert!((confidence(None, Some(&own), 20.0, 80.0) - 48.0).abs() < 1e-9);
        assert_eq!(confidence(None, None, 30.0, 20.0), 0.0);
    }

    #[test]
    fn lone_match_uses_higher_raw_score() {
        let p = PlanCandidate {
            plan: plan(10, 1, "P"),
            score: 45.0,
            carrier_affinity: false,
        };
        // best carrier 49 is under its threshold but still the higher score
        assert!((confidence(None, Some(&p), 49.0, 45.0) - 29.4).abs() < 1e-9);
    }

    #[test]
    fn carriers_ranked_stably() {
        let carriers = vec![
            carrier(1, "Alpha Health"),
            carrier(2, "Beta Health"),
            carrier(3, "Gamma Health"),
        ];
        let ranked = rank_carriers(&search_text("Beta Health and Gamma Health"), &carriers);
        let ids: Vec<i64> = ranked.iter().map(|c| c.carrier.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(ranked[2].score, 50.0);
    }

    #[test]
    fn affinity_reorders_near_ties_without_changing_scores() {
        let plans = vec![
            plan(10, 2, "Value Plus Saver"),
            plan(11, 1, "Value Choice Max"),
        ];
        let text = search_text("Value Plus Choice");
        let ranked = rank_plans(&text, &[], &plans, Some(1));
        // both hit two of three words
        assert_eq!(ranked[0].plan.id, 11);
        assert!(ranked[0].carrier_affinity);
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn margin_does_not_overturn_large_gaps() {
        let plans = vec![plan(10, 2, "Premier Rx"), plan(11, 1, "Basic Extra Silver")];
        let text = search_text("PREMIER RX summary, basic coverage");
        let ranked = rank_plans(&text, &[], &plans, Some(1));
        assert_eq!(ranked[0].plan.id, 10);
    }

    #[test]
    fn match_catalog_picks_thresholded_winners() {
        let catalog = Catalog::new(
            vec![carrier(1, "Evergreen Health"), carrier(2, "Cascade Care")],
            vec![
                plan(10, 1, "Evergreen Gold H1111-001"),
                plan(20, 2, "Cascade Basic H2222-001"),
            ],
        );
        let m = CatalogMatcher::new().unwrap();
        let text = search_text("Evergreen Health 2025 summary for plan H1111-001");
        let result = m.match_catalog(&text, &catalog);
        assert_eq!(result.carrier.as_ref().unwrap().carrier.id, 1);
        assert_eq!(result.plan.as_ref().unwrap().plan.id, 10);
        assert!(result.is_consistent());
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.carrier_candidates.len(), 2);
        assert_eq!(result.plan_candidates.len(), 2);
    }
}
