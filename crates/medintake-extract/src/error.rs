use thiserror::Error;

/// Hard failures while turning a document into text.
///
/// Each is fatal for the document that raised it and is never retried.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: .{0}")]
    UnsupportedFormat(String),

    #[error("unreadable document: {0}")]
    Unreadable(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error(
        "scanned PDF: only {chars} characters of embedded text; \
         convert the document to an image (PNG or JPEG) and upload it again"
    )]
    ScannedDocument { chars: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True for the scanned-PDF case, which the caller can fix by resubmitting.
    pub fn is_scanned(&self) -> bool {
        matches!(self, Self::ScannedDocument { .. })
    }
}
