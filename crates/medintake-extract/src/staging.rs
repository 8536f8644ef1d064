//! Temporary on-disk copies of uploaded documents.
//!
//! Extraction backends want a path, so each document is written to a named
//! temp file owned by the call processing it. The file is removed when the
//! [`StagedDocument`] is closed or dropped, so every exit path cleans up.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::ExtractError;

pub struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    /// Write `bytes` to a fresh temp file with the given extension.
    pub fn write(bytes: &[u8], extension: &str) -> Result<Self, ExtractError> {
        Self::create(bytes, extension, None)
    }

    /// Like [`StagedDocument::write`], but inside `dir`.
    pub fn write_in(dir: &Path, bytes: &[u8], extension: &str) -> Result<Self, ExtractError> {
        Self::create(bytes, extension, Some(dir))
    }

    fn create(bytes: &[u8], extension: &str, dir: Option<&Path>) -> Result<Self, ExtractError> {
        let suffix = format!(".{extension}");
        let mut builder = tempfile::Builder::new();
        builder.prefix("medintake-").suffix(&suffix);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = bytes.len(), "staged document");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the temp file now, logging (not failing) if removal goes wrong.
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!(path = %path.display(), error = %e, "failed to remove staged document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_file_holds_bytes_with_extension() {
        let staged = StagedDocument::write(b"hello", "png").unwrap();
        assert_eq!(staged.path().extension().unwrap(), "png");
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"hello");
        staged.close();
    }

    #[test]
    fn close_removes_file() {
        let staged = StagedDocument::write(b"x", "pdf").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        staged.close();
        assert!(!path.exists());
    }

    #[test]
    fn write_in_uses_given_dir() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedDocument::write_in(dir.path(), b"x", "png").unwrap();
        assert_eq!(staged.path().parent(), Some(dir.path()));
        staged.close();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn drop_removes_file() {
        let path = {
            let staged = StagedDocument::write(b"x", "pdf").unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
