//! Optical character recognition for raster images.
//!
//! The [`OcrEngine`] trait is the seam between the pipeline and the OCR
//! backend. [`TesseractCli`] runs the `tesseract` binary over the whole image
//! with one language model; no cropping or deskewing is attempted.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::ExtractError;

/// Default OCR language model.
pub const DEFAULT_OCR_LANG: &str = "eng";

/// Anything that can read the text out of an image file.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &Path) -> Result<String, ExtractError>;
}

/// OCR through the Tesseract command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    lang: String,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>, lang: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            lang: lang.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", DEFAULT_OCR_LANG)
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &Path) -> Result<String, ExtractError> {
        debug!(image = %image.display(), lang = %self.lang, "running tesseract");

        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                ExtractError::Extraction(format!(
                    "failed to launch {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Extraction(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(image = %image.display(), chars = text.len(), "ocr complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_uses_english() {
        let engine = TesseractCli::default();
        assert_eq!(engine.lang(), "eng");
        assert_eq!(engine.binary(), Path::new("tesseract"));
    }

    #[tokio::test]
    async fn missing_binary_is_extraction_error() {
        let engine = TesseractCli::new("/nonexistent/medintake-tesseract", "eng");
        let err = engine
            .recognize(Path::new("/tmp/does-not-matter.png"))
            .await
            .unwrap_err();
        match err {
            ExtractError::Extraction(msg) => assert!(msg.contains("failed to launch")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
