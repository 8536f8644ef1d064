//! Document classification and the auto-assignment gate.
//!
//! A result is [`MatchOutcome::Matched`] only when the document type is known,
//! both a carrier and a plan matched, the plan belongs to that carrier, and
//! confidence is at least [`ACCEPTANCE_THRESHOLD`]. Everything else carries a
//! review reason and the top candidates for a human to pick from.

use tracing::info;

use medintake_core::{
    Catalog, ClassificationResult, DocumentType, IntakeFields, MatchOutcome, ReviewReason,
    Suggestions,
};

use crate::ClassifyError;
use crate::benefits::BenefitParser;
use crate::doctype::{detect_document_type, search_text};
use crate::intake::IntakeParser;
use crate::matcher::{CatalogMatch, CatalogMatcher};

/// Minimum confidence for automatic assignment.
pub const ACCEPTANCE_THRESHOLD: f64 = 40.0;

/// Candidates offered per list when a result needs review.
pub const SUGGESTION_LIMIT: usize = 3;

/// Compiled pattern banks and matcher, built once and shared across documents.
#[derive(Debug)]
pub struct DocumentClassifier {
    matcher: CatalogMatcher,
    benefits: BenefitParser,
    intake: IntakeParser,
}

impl DocumentClassifier {
    pub fn new() -> Result<Self, ClassifyError> {
        Ok(Self {
            matcher: CatalogMatcher::new()?,
            benefits: BenefitParser::new()?,
            intake: IntakeParser::new()?,
        })
    }

    /// Classify already-extracted text against `catalog`.
    pub fn classify_text(&self, text: &str, catalog: &Catalog) -> ClassificationResult {
        let normalized = search_text(text);
        let document_type = detect_document_type(&normalized);
        let matched = self.matcher.match_catalog(&normalized, catalog);
        let outcome = gate(document_type, &matched);

        let extracted_benefits = (document_type == DocumentType::SummaryOfBenefits)
            .then(|| self.benefits.parse(text));

        // A plan from another carrier is never reported as the match.
        let matched_plan = match (&matched.carrier, &matched.plan) {
            (Some(_), Some(_)) if !matched.is_consistent() => None,
            (_, plan) => plan.as_ref().map(|p| p.plan.clone()),
        };

        info!(
            document_type = %document_type,
            carrier = matched.carrier.as_ref().map(|c| c.carrier.name.as_str()),
            plan = matched_plan.as_ref().map(|p| p.name.as_str()),
            confidence = matched.confidence,
            outcome = outcome.as_str(),
            "classified document"
        );

        ClassificationResult {
            document_type,
            matched_carrier: matched.carrier.map(|c| c.carrier),
            matched_plan,
            confidence: matched.confidence,
            carrier_candidates: matched.carrier_candidates,
            plan_candidates: matched.plan_candidates,
            extracted_benefits,
            outcome,
        }
    }

    /// Read client identity fields from any document's text.
    pub fn intake_text(&self, text: &str) -> IntakeFields {
        self.intake.parse(text)
    }
}

fn gate(document_type: DocumentType, matched: &CatalogMatch) -> MatchOutcome {
    if !document_type.is_known() {
        return MatchOutcome::Unrecognized {
            suggestions: suggestions(matched),
        };
    }
    let reason = if matched.carrier.is_none() {
        ReviewReason::NoCarrierMatch
    } else if matched.plan.is_none() {
        ReviewReason::NoPlanMatch
    } else if !matched.is_consistent() {
        ReviewReason::CarrierMismatch
    } else if matched.confidence < ACCEPTANCE_THRESHOLD {
        // Unreachable with the current thresholds: an agreeing pair averages
        // at least (50 + 40) / 2 = 45. Kept so a lowered threshold still gates.
        ReviewReason::LowConfidence
    } else {
        return MatchOutcome::Matched;
    };
    MatchOutcome::NeedsReview {
        reason,
        suggestions: suggestions(matched),
    }
}

/// Top-scoring candidates with a non-zero score.
fn suggestions(matched: &CatalogMatch) -> Suggestions {
    Suggestions {
        carriers: matched
            .carrier_candidates
            .iter()
            .filter(|c| c.score > 0.0)
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect(),
        plans: matched
            .plan_candidates
            .iter()
            .filter(|p| p.score > 0.0)
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect(),
    }
}
