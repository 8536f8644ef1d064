//! Additive scoring of one alternative plan against the current plan.
//!
//! Every candidate starts at [`BASE_SCORE`]; each rule that fires adds (or
//! subtracts) its points and appends its reason, so `reasons` lists the rules
//! in the order they are evaluated here:
//!
//! | Rule | Condition | Points |
//! |---|---|---|
//! | Premium | more than $50/month cheaper | +40 |
//! | Premium | $20 to $50/month cheaper | +25 |
//! | Premium | cheaper by less than $20/month | +10 |
//! | Premium | any increase | −20 |
//! | MOOP | lower than current | +30 |
//! | PCP copay | lower than current | +10 |
//! | Specialist copay | lower than current | +10 |
//! | SNP | C-SNP or D-SNP | +15 |
//!
//! Missing premiums and copays count as 0. A missing MOOP counts as
//! [`MOOP_SENTINEL`], so any real MOOP beats a plan with none on record.

use medintake_core::{ComparisonCandidate, Plan, SnpType};

pub const BASE_SCORE: i32 = 100;

pub const LARGE_SAVINGS: f64 = 50.0;
pub const MEDIUM_SAVINGS: f64 = 20.0;

pub const LARGE_SAVINGS_POINTS: i32 = 40;
pub const MEDIUM_SAVINGS_POINTS: i32 = 25;
pub const SMALL_SAVINGS_POINTS: i32 = 10;
pub const PREMIUM_INCREASE_PENALTY: i32 = -20;
pub const MOOP_POINTS: i32 = 30;
pub const COPAY_POINTS: i32 = 10;
pub const SNP_POINTS: i32 = 15;

/// Stand-in for a missing max-out-of-pocket.
pub const MOOP_SENTINEL: f64 = 999_999.0;

/// Score `candidate` against `current`.
pub fn score_candidate(current: &Plan, candidate: &Plan) -> ComparisonCandidate {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    let savings = premium(current) - premium(candidate);
    if savings > LARGE_SAVINGS {
        score += LARGE_SAVINGS_POINTS;
        reasons.push(saves_reason(savings));
    } else if savings >= MEDIUM_SAVINGS {
        score += MEDIUM_SAVINGS_POINTS;
        reasons.push(saves_reason(savings));
    } else if savings > 0.0 {
        score += SMALL_SAVINGS_POINTS;
        reasons.push(saves_reason(savings));
    } else if savings < 0.0 {
        score += PREMIUM_INCREASE_PENALTY;
        reasons.push(format!("Higher premium by ${}/month", format_dollars(-savings)));
    }

    let (current_moop, candidate_moop) = (moop(current), moop(candidate));
    if candidate_moop < current_moop {
        score += MOOP_POINTS;
        reasons.push(format!(
            "Lower max out-of-pocket by ${}",
            format_dollars(current_moop - candidate_moop)
        ));
    }

    if copay(candidate.pcp_copay) < copay(current.pcp_copay) {
        score += COPAY_POINTS;
        reasons.push("Lower primary care copay".to_string());
    }
    if copay(candidate.specialist_copay) < copay(current.specialist_copay) {
        score += COPAY_POINTS;
        reasons.push("Lower specialist copay".to_string());
    }

    match candidate.snp_type {
        Some(SnpType::Chronic) => {
            score += SNP_POINTS;
            reasons.push("C-SNP plan for chronic conditions".to_string());
        }
        Some(SnpType::DualEligible) => {
            score += SNP_POINTS;
            reasons.push("D-SNP plan for dual-eligible".to_string());
        }
        Some(SnpType::Institutional) | None => {}
    }

    ComparisonCandidate {
        plan: candidate.clone(),
        score,
        reasons,
    }
}

fn premium(plan: &Plan) -> f64 {
    plan.monthly_premium.unwrap_or(0.0)
}

fn moop(plan: &Plan) -> f64 {
    plan.moop.unwrap_or(MOOP_SENTINEL)
}

fn copay(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn saves_reason(savings: f64) -> String {
    format!("Saves ${}/month on premium", format_dollars(savings))
}

/// `75` for whole dollars, `12.50` otherwise.
pub fn format_dollars(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    if cents % 100.0 == 0.0 {
        format!("{:.0}", cents / 100.0)
    } else {
        format!("{:.2}", cents / 100.0)
    }
}
