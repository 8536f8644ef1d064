//! Document-level entry points: extract text, then classify.

use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use medintake_core::{Catalog, ClassificationResult, IntakeFields, RawDocument};
use medintake_extract::{ExtractError, OcrEngine, extract_text, read_document};

use crate::classifier::DocumentClassifier;

/// A document with the name it was submitted under.
#[derive(Debug, Clone)]
pub struct NamedDocument {
    pub name: String,
    pub document: RawDocument,
}

/// Per-document batch result; one failure does not stop the batch.
#[derive(Debug)]
pub struct BatchItem {
    pub name: String,
    /// The document that was classified, handed back for archiving.
    /// `None` when it could not be read.
    pub document: Option<RawDocument>,
    pub result: Result<ClassificationResult, ExtractError>,
}

impl DocumentClassifier {
    /// Extract text from `doc` and classify it.
    ///
    /// Extraction failures (unsupported format, scanned PDF, OCR error) are
    /// returned as errors; ambiguous matches are not errors.
    pub async fn classify_document(
        &self,
        doc: &RawDocument,
        catalog: &Catalog,
        ocr: &dyn OcrEngine,
    ) -> Result<ClassificationResult, ExtractError> {
        let text = extract_text(doc, ocr).await?;
        Ok(self.classify_text(&text, catalog))
    }

    /// Extract text from `doc` and read client identity fields from it.
    pub async fn intake_document(
        &self,
        doc: &RawDocument,
        ocr: &dyn OcrEngine,
    ) -> Result<IntakeFields, ExtractError> {
        let text = extract_text(doc, ocr).await?;
        Ok(self.intake_text(&text))
    }

    /// Classify many documents, at most `concurrency` at a time.
    ///
    /// Results come back in input order.
    pub async fn classify_batch(
        &self,
        docs: Vec<NamedDocument>,
        catalog: &Catalog,
        ocr: &dyn OcrEngine,
        concurrency: usize,
    ) -> Vec<BatchItem> {
        let items: Vec<BatchItem> = stream::iter(docs)
            .map(|named| self.classify_named(named, catalog, ocr))
            .buffered(concurrency.max(1))
            .collect()
            .await;
        log_batch(&items);
        items
    }

    /// Read and classify files, at most `concurrency` at a time.
    ///
    /// A file that cannot be read fails on its own item; the rest of the
    /// batch still runs. Results come back in input order.
    pub async fn classify_files(
        &self,
        paths: Vec<PathBuf>,
        catalog: &Catalog,
        ocr: &dyn OcrEngine,
        concurrency: usize,
    ) -> Vec<BatchItem> {
        let items: Vec<BatchItem> = stream::iter(paths)
            .map(|path| async move {
                let name = path.display().to_string();
                match read_document(&path).await {
                    Ok(document) => {
                        self.classify_named(NamedDocument { name, document }, catalog, ocr)
                            .await
                    }
                    Err(e) => {
                        warn!(document = %name, error = %e, "document failed");
                        BatchItem {
                            name,
                            document: None,
                            result: Err(e),
                        }
                    }
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;
        log_batch(&items);
        items
    }

    async fn classify_named(
        &self,
        named: NamedDocument,
        catalog: &Catalog,
        ocr: &dyn OcrEngine,
    ) -> BatchItem {
        let result = self.classify_document(&named.document, catalog, ocr).await;
        if let Err(e) = &result {
            warn!(document = %named.name, error = %e, "document failed");
        }
        BatchItem {
            name: named.name,
            document: Some(named.document),
            result,
        }
    }
}

fn log_batch(items: &[BatchItem]) {
    let failed = items.iter().filter(|i| i.result.is_err()).count();
    let matched = items
        .iter()
        .filter(|i| i.result.as_ref().is_ok_and(|r| r.is_auto_assignable()))
        .count();
    info!(total = items.len(), matched, failed, "batch classified");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use medintake_core::{Carrier, DocumentType, Plan};

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    /// Returns scripted pages in call order and counts calls.
    struct ScriptedOcr {
        pages: Vec<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OcrEngine for ScriptedOcr {
        async fn recognize(&self, _image: &Path) -> Result<String, ExtractError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(n)
                .map(|p| p.to_string())
                .ok_or_else(|| ExtractError::Extraction("no more pages".into()))
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Carrier {
                id: 1,
                name: "Evergreen Health".into(),
            }],
            vec![Plan {
                id: 10,
                carrier_id: 1,
                name: "Evergreen Gold H1111-001".into(),
                ..Default::default()
            }],
        )
    }

    fn image(name: &str) -> NamedDocument {
        NamedDocument {
            name: name.into(),
            document: RawDocument::new(PNG_MAGIC.to_vec(), "png"),
        }
    }

    #[tokio::test]
    async fn image_document_classified_through_ocr() {
        let ocr = ScriptedOcr {
            pages: vec!["Evergreen Health Summary of Benefits H1111-001"],
            calls: AtomicUsize::new(0),
        };
        let classifier = DocumentClassifier::new().unwrap();
        let doc = RawDocument::new(PNG_MAGIC.to_vec(), "PNG");

        let result = classifier
            .classify_document(&doc, &catalog(), &ocr)
            .await
            .unwrap();
        assert_eq!(result.document_type, DocumentType::SummaryOfBenefits);
        assert!(result.is_auto_assignable());
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn batch_keeps_order_and_isolates_failures() {
        let ocr = ScriptedOcr {
            pages: vec!["Evergreen Health Summary of Benefits H1111-001"],
            calls: AtomicUsize::new(0),
        };
        let classifier = DocumentClassifier::new().unwrap();
        let docs = vec![
            image("sob.png"),
            NamedDocument {
                name: "letter.docx".into(),
                document: RawDocument::new(b"PK".to_vec(), "docx"),
            },
        ];

        let items = classifier.classify_batch(docs, &catalog(), &ocr, 1).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "sob.png");
        assert!(items[0].result.as_ref().unwrap().is_auto_assignable());
        assert_eq!(items[1].name, "letter.docx");
        assert!(matches!(
            items[1].result,
            Err(ExtractError::UnsupportedFormat(_))
        ));
        assert_eq!(items[1].document.as_ref().unwrap().extension, "docx");
    }

    #[tokio::test]
    async fn unreadable_file_fails_alone() {
        let ocr = ScriptedOcr {
            pages: vec!["Evergreen Health Summary of Benefits H1111-001"],
            calls: AtomicUsize::new(0),
        };
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        std::fs::write(&good, PNG_MAGIC).unwrap();
        let missing = dir.path().join("missing.png");

        let classifier = DocumentClassifier::new().unwrap();
        let items = classifier
            .classify_files(vec![missing, good], &catalog(), &ocr, 2)
            .await;

        assert_eq!(items.len(), 2);
        assert!(items[0].name.ends_with("missing.png"));
        assert!(items[0].document.is_none());
        assert!(matches!(items[0].result, Err(ExtractError::Unreadable(_))));

        assert!(items[1].name.ends_with("good.png"));
        assert!(items[1].result.as_ref().unwrap().is_auto_assignable());
        assert_eq!(items[1].document.as_ref().unwrap().bytes, PNG_MAGIC);
    }

    #[tokio::test]
    async fn intake_document_reads_identity() {
        let ocr = ScriptedOcr {
            pages: vec!["Beneficiary name: Ada Lovelace\nPhone: 206-555-0100"],
            calls: AtomicUsize::new(0),
        };
        let classifier = DocumentClassifier::new().unwrap();
        let fields = classifier
            .intake_document(&image("card.png").document, &ocr)
            .await
            .unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(fields.phone.as_deref(), Some("(206) 555-0100"));
    }
}
