//! Text extraction: raw document bytes in, plain text out.
//!
//! PDFs are read from their embedded text layer; images go through an
//! [`OcrEngine`]. Extraction is attempted exactly once per document.

mod error;
pub mod ocr;
pub mod pdf;
pub mod staging;

pub use error::ExtractError;
pub use ocr::{OcrEngine, TesseractCli};
pub use staging::StagedDocument;

use std::path::Path;

use medintake_core::{MediaKind, RawDocument};
use tracing::{debug, info};

/// Read a document from disk, taking its extension from the path.
///
/// A missing or unreadable file is [`ExtractError::Unreadable`] naming the path,
/// so batch callers can report it against that document alone.
pub async fn read_document(path: &Path) -> Result<RawDocument, ExtractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractError::Unreadable(format!("{}: {e}", path.display())))?;
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(RawDocument::new(bytes, extension))
}

/// Extract plain text from `doc`.
///
/// The document is staged to a temp file for the backend and the file is
/// removed before returning, on success and on failure.
pub async fn extract_text(doc: &RawDocument, ocr: &dyn OcrEngine) -> Result<String, ExtractError> {
    extract(doc, ocr, None).await
}

async fn extract(
    doc: &RawDocument,
    ocr: &dyn OcrEngine,
    staging_dir: Option<&Path>,
) -> Result<String, ExtractError> {
    let kind = doc
        .media_kind()
        .ok_or_else(|| ExtractError::UnsupportedFormat(doc.extension.clone()))?;

    if doc.bytes.is_empty() {
        return Err(ExtractError::Unreadable("document is empty".into()));
    }
    if kind == MediaKind::Image {
        image::guess_format(&doc.bytes).map_err(|e| {
            ExtractError::Unreadable(format!("not a recognised image: {e}"))
        })?;
    }

    let staged = match staging_dir {
        Some(dir) => StagedDocument::write_in(dir, &doc.bytes, &doc.extension)?,
        None => StagedDocument::write(&doc.bytes, &doc.extension)?,
    };
    let result = match kind {
        MediaKind::Pdf => pdf::extract_pdf_text(staged.path()).await,
        MediaKind::Image => ocr.recognize(staged.path()).await,
    };
    staged.close();

    match &result {
        Ok(text) => info!(
            extension = %doc.extension,
            bytes = doc.bytes.len(),
            chars = text.len(),
            "extracted document text"
        ),
        Err(e) => debug!(extension = %doc.extension, error = %e, "extraction failed"),
    }
    result
}
