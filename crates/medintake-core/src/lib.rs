//! Core types shared by the intake pipeline: carrier/plan catalogs, raw documents,
//! partial field records, classification results, and plan comparison results.

pub mod catalog;
pub mod classification;
pub mod comparison;
pub mod document;
pub mod fields;
pub mod normalize;

pub use catalog::{Carrier, Catalog, Plan, SnpType};
pub use classification::{
    CarrierCandidate, ClassificationResult, MatchOutcome, PlanCandidate, ReviewReason,
    Suggestions,
};
pub use comparison::{ClientProfile, ComparisonCandidate, ScoredComparisonResult};
pub use document::{DocumentType, MediaKind, RawDocument};
pub use fields::{AmountKind, BenefitField, BenefitFields, IntakeField, IntakeFields};
