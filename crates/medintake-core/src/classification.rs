//! Classification results: document type, carrier/plan match, and review status.

use serde::{Deserialize, Serialize};

use crate::catalog::{Carrier, Plan};
use crate::document::DocumentType;
use crate::fields::BenefitFields;

/// A catalog carrier scored against document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierCandidate {
    pub carrier: Carrier,
    /// 0–100.
    pub score: f64,
}

/// A catalog plan scored against document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCandidate {
    pub plan: Plan,
    /// 0–100.
    pub score: f64,
    /// True when the plan belongs to the carrier already matched for this document.
    pub carrier_affinity: bool,
}

/// Why a classification was not auto-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    NoCarrierMatch,
    NoPlanMatch,
    /// Plan and carrier both matched but the plan belongs to another carrier.
    CarrierMismatch,
    /// Carrier and plan agree but confidence is under the acceptance gate.
    LowConfidence,
}

impl ReviewReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCarrierMatch => "no carrier matched",
            Self::NoPlanMatch => "no plan matched",
            Self::CarrierMismatch => "plan belongs to a different carrier",
            Self::LowConfidence => "confidence below acceptance gate",
        }
    }
}

/// Top candidates offered to a human for manual resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub carriers: Vec<CarrierCandidate>,
    pub plans: Vec<PlanCandidate>,
}

/// Outcome of the acceptance gate.
///
/// Ambiguous matches are data, not failures: callers branch on this instead of
/// catching errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Carrier and plan agree and confidence clears the gate; safe to auto-assign.
    Matched,
    /// Document type known, but the match needs a human decision.
    NeedsReview {
        reason: ReviewReason,
        suggestions: Suggestions,
    },
    /// No document-type keywords matched; never auto-assigned.
    Unrecognized { suggestions: Suggestions },
}

impl MatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NeedsReview { .. } => "needs_review",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched)
    }

    pub fn suggestions(&self) -> Option<&Suggestions> {
        match self {
            Self::Matched => None,
            Self::NeedsReview { suggestions, .. } | Self::Unrecognized { suggestions } => {
                Some(suggestions)
            }
        }
    }
}

/// Classification of a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub document_type: DocumentType,
    pub matched_carrier: Option<Carrier>,
    /// Withheld when it belongs to a carrier other than `matched_carrier`.
    pub matched_plan: Option<Plan>,
    /// 0–100; 0 unless at least one of carrier/plan matched.
    pub confidence: f64,
    /// Every catalog carrier, best first.
    pub carrier_candidates: Vec<CarrierCandidate>,
    /// Every catalog plan, best first.
    pub plan_candidates: Vec<PlanCandidate>,
    /// Present only for Summary-of-Benefits documents.
    pub extracted_benefits: Option<BenefitFields>,
    pub outcome: MatchOutcome,
}

impl ClassificationResult {
    /// True when the result may be attached to a plan without human review.
    pub fn is_auto_assignable(&self) -> bool {
        self.outcome.is_matched()
    }
}
