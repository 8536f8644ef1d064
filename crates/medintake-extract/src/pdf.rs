//! PDF text-layer extraction.
//!
//! Only the embedded text layer is read. A PDF whose text layer is too thin is
//! a scan; it is rejected with a hint to resubmit it as an image rather than
//! OCR'd here.

use std::path::Path;

use tracing::debug;

use crate::ExtractError;

/// Text layers with fewer characters than this are treated as scanned PDFs.
pub const MIN_TEXT_LAYER_CHARS: usize = 50;

/// Extract the embedded text of the PDF at `path`.
pub async fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    let owned = path.to_path_buf();
    // pdf-extract is synchronous and can panic on malformed input; a panic
    // surfaces here as a JoinError.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
        .await
        .map_err(|e| ExtractError::Extraction(format!("pdf worker failed: {e}")))?
        .map_err(|e| ExtractError::Extraction(e.to_string()))?;

    debug!(path = %path.display(), chars = text.len(), "read pdf text layer");
    require_text_layer(text)
}

/// Reject text layers shorter than [`MIN_TEXT_LAYER_CHARS`] (trimmed).
pub fn require_text_layer(text: String) -> Result<String, ExtractError> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_LAYER_CHARS {
        return Err(ExtractError::ScannedDocument { chars });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_layer_is_scanned() {
        let err = require_text_layer("  Page 1 of 12  \n".into()).unwrap_err();
        assert!(err.is_scanned());
        assert!(err.to_string().contains("convert the document to an image"));
    }

    #[test]
    fn empty_text_layer_is_scanned() {
        let err = require_text_layer(String::new()).unwrap_err();
        assert!(matches!(err, ExtractError::ScannedDocument { chars: 0 }));
    }

    #[test]
    fn boundary_at_fifty_characters() {
        let forty_nine = "x".repeat(49);
        assert!(require_text_layer(forty_nine).unwrap_err().is_scanned());

        let fifty = "x".repeat(50);
        assert_eq!(require_text_layer(fifty.clone()).unwrap(), fifty);
    }

    #[test]
    fn padding_does_not_count() {
        let padded = format!("{}{}{}", " ".repeat(40), "x".repeat(20), "\n".repeat(40));
        assert!(require_text_layer(padded).unwrap_err().is_scanned());
    }

    #[tokio::test]
    async fn corrupt_pdf_never_yields_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(extract_pdf_text(&path).await.is_err());
    }
}
