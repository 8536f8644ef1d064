//! Classification of Medicare plan documents.
//!
//! Text goes in (from [`medintake_extract`]); out comes a document type, the
//! best carrier and plan from the caller's catalog, a confidence score, the
//! acceptance-gate outcome and, for Summaries of Benefits, the benefit fields.

pub mod benefits;
pub mod classifier;
pub mod doctype;
mod error;
pub mod intake;
pub mod matcher;
pub mod patterns;
pub mod pipeline;

pub use benefits::BenefitParser;
pub use classifier::{ACCEPTANCE_THRESHOLD, DocumentClassifier, SUGGESTION_LIMIT};
pub use error::ClassifyError;
pub use intake::IntakeParser;
pub use matcher::CatalogMatcher;
pub use pipeline::{BatchItem, NamedDocument};
