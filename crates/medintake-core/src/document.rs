//! Raw documents and document categories.

use serde::{Deserialize, Serialize};

/// Image extensions routed to OCR.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];

/// How a document's text is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// PDF with (hopefully) an embedded text layer.
    Pdf,
    /// Raster image read with OCR.
    Image,
}

impl MediaKind {
    /// Infer the media kind from a declared extension (`"pdf"`, `".PNG"`, ...).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = normalize_extension(ext);
        if ext == "pdf" {
            Some(Self::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Lowercase an extension and strip any leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Document bytes plus the extension the caller declared for them.
///
/// Transient: created per request and dropped once processed.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            bytes,
            extension: normalize_extension(&extension.into()),
        }
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        MediaKind::from_extension(&self.extension)
    }
}

/// Carrier document categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Summary of Benefits.
    #[serde(rename = "SOB")]
    SummaryOfBenefits,
    /// Evidence of Coverage.
    #[serde(rename = "EOC")]
    EvidenceOfCoverage,
    /// Annual Notice of Change.
    #[serde(rename = "ANOC")]
    AnnualNoticeOfChange,
    #[serde(rename = "PROVIDER_DIRECTORY")]
    ProviderDirectory,
    #[serde(rename = "FORMULARY")]
    Formulary,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SummaryOfBenefits => "SOB",
            Self::EvidenceOfCoverage => "EOC",
            Self::AnnualNoticeOfChange => "ANOC",
            Self::ProviderDirectory => "PROVIDER_DIRECTORY",
            Self::Formulary => "FORMULARY",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SummaryOfBenefits => "Summary of Benefits",
            Self::EvidenceOfCoverage => "Evidence of Coverage",
            Self::AnnualNoticeOfChange => "Annual Notice of Change",
            Self::ProviderDirectory => "Provider Directory",
            Self::Formulary => "Drug Formulary",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
