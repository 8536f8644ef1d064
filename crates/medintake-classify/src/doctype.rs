//! Document type detection by keyword.

use medintake_core::DocumentType;

/// Keywords per type, checked in this order; the first type with any hit wins.
pub const DOCUMENT_KEYWORDS: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::SummaryOfBenefits,
        &["SUMMARY OF BENEFITS", "SUMMARY OF BENEFIT", "BENEFITS SUMMARY"],
    ),
    (DocumentType::EvidenceOfCoverage, &["EVIDENCE OF COVERAGE"]),
    (
        DocumentType::AnnualNoticeOfChange,
        &["ANNUAL NOTICE OF CHANGES", "ANNUAL NOTICE OF CHANGE"],
    ),
    (
        DocumentType::ProviderDirectory,
        &["PROVIDER DIRECTORY", "PHARMACY DIRECTORY"],
    ),
    (
        DocumentType::Formulary,
        &["FORMULARY", "DRUG LIST", "LIST OF COVERED DRUGS"],
    ),
];

/// Uppercase `text` and collapse whitespace, so keywords split across OCR
/// line breaks still match.
pub fn search_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Detect the document type of already-normalised text (see [`search_text`]).
pub fn detect_document_type(normalized: &str) -> DocumentType {
    DOCUMENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(ty, _)| *ty)
        .unwrap_or(DocumentType::Unknown)
}
