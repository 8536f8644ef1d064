//! Accepted-document archive.
//!
//! Documents that passed the acceptance gate are stored under
//! `TYPE_plan-slug_YYYYMMDDTHHMMSSZ.ext`, e.g.
//! `SOB_evergreen-gold-h1111-001_20250114T093000Z.pdf`. Files are created
//! once and never overwritten; a second document landing on the same name in
//! the same second is stored as `...Z-2.pdf`, then `-3`, and so on.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use medintake_core::document::normalize_extension;
use medintake_core::{DocumentType, Plan};

use crate::StoreError;

/// UTC timestamp layout used in archive and snapshot file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

pub fn archive_file_name(
    document_type: DocumentType,
    plan: &Plan,
    at: DateTime<Utc>,
    extension: &str,
) -> String {
    format!(
        "{}_{}_{}.{}",
        document_type.as_str(),
        slug(&plan.name),
        at.format(TIMESTAMP_FORMAT),
        normalize_extension(extension)
    )
}

/// Lowercase ASCII letters and digits; every other run becomes one `-`.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "plan".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Numbered variants tried before giving up on a name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Store `bytes` as `dir/file_name`, creating `dir` if needed.
///
/// Returns the path written, which carries a `-N` suffix when `file_name`
/// was already taken.
pub fn archive_document(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)?;
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered_name(file_name, attempt));
        match write_new(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "archived document");
                return Ok(path);
            }
            Err(StoreError::AlreadyExists(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(StoreError::AlreadyExists(dir.join(file_name)))
}

/// `file_name` itself for the first attempt, then `stem-N.ext`.
fn numbered_name(file_name: &str, attempt: usize) -> String {
    if attempt == 1 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{attempt}.{ext}"),
        _ => format!("{file_name}-{attempt}"),
    }
}

/// Write a file that must not already exist.
pub(crate) fn write_new(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_path_buf()),
            _ => StoreError::Io(e),
        })?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plan(name: &str) -> Plan {
        Plan {
            id: 10,
            carrier_id: 1,
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn file_name_layout() {
        let at = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap();
        let name = archive_file_name(
            DocumentType::SummaryOfBenefits,
            &plan("Evergreen Gold (HMO) H1111-001"),
            at,
            ".PDF",
        );
        assert_eq!(name, "SOB_evergreen-gold-hmo-h1111-001_20250114T093000Z.pdf");
    }

    #[test]
    fn slug_edge_cases() {
        assert_eq!(slug("  --Plus++ Plan  "), "plus-plan");
        assert_eq!(slug("***"), "plan");
    }

    #[test]
    fn same_name_twice_keeps_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("accepted");
        let name = "SOB_x_20250101T000000Z.pdf";

        let first = archive_document(&target, name, b"first").unwrap();
        let second = archive_document(&target, name, b"second").unwrap();
        let third = archive_document(&target, name, b"third").unwrap();

        assert_eq!(first, target.join(name));
        assert_eq!(second, target.join("SOB_x_20250101T000000Z-2.pdf"));
        assert_eq!(third, target.join("SOB_x_20250101T000000Z-3.pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 3);
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name("a.pdf", 1), "a.pdf");
        assert_eq!(numbered_name("a.pdf", 2), "a-2.pdf");
        assert_eq!(numbered_name("noext", 4), "noext-4");
    }
}
