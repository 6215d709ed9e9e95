//! Backup jobs and the manifest they are loaded from
//!
//! The manifest is a JSON array of objects with `fileId`, `mimeType`,
//! `extension` and `fileName` fields. It is loaded once at startup, verbatim
//! and in order.

use super::ids::{DocumentId, ExportMimeType};
use super::{BackupError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One manifest entry: a document and the form it should be exported in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupJob {
    /// Remote document identifier
    #[serde(rename = "fileId")]
    pub document_id: DocumentId,

    /// MIME type to export the document as
    #[serde(rename = "mimeType")]
    pub export_mime_type: ExportMimeType,

    /// Extension of the produced file, without the leading dot
    #[serde(rename = "extension")]
    pub file_extension: String,

    /// Base name of the produced file
    #[serde(rename = "fileName")]
    pub base_file_name: String,
}

impl BackupJob {
    /// Create a new backup job
    pub fn new(
        document_id: DocumentId,
        export_mime_type: ExportMimeType,
        file_extension: impl Into<String>,
        base_file_name: impl Into<String>,
    ) -> Self {
        Self {
            document_id,
            export_mime_type,
            file_extension: file_extension.into(),
            base_file_name: base_file_name.into(),
        }
    }

    /// File name produced for this job at the given timestamp
    ///
    /// ```
    /// use drive_backup::domain::BackupJob;
    ///
    /// let job = BackupJob::new(
    ///     "abc123".parse().unwrap(),
    ///     "application/pdf".parse().unwrap(),
    ///     "pdf",
    ///     "ledger",
    /// );
    /// assert_eq!(job.file_name("20240301-120000"), "20240301-120000-ledger.pdf");
    /// ```
    pub fn file_name(&self, timestamp: &str) -> String {
        format!(
            "{}-{}.{}",
            timestamp, self.base_file_name, self.file_extension
        )
    }
}

/// Parses manifest JSON into jobs, keeping the configured order
pub fn parse_manifest(contents: &str) -> Result<Vec<BackupJob>> {
    serde_json::from_str(contents)
        .map_err(|e| BackupError::Manifest(format!("Failed to parse manifest: {e}")))
}

/// Loads the backup manifest from a JSON file
///
/// # Errors
///
/// Returns [`BackupError::Manifest`] if the file cannot be read or does not
/// parse as a list of jobs.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<BackupJob>> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|e| {
        BackupError::Manifest(format!(
            "Failed to read manifest {}: {}",
            path.display(),
            e
        ))
    })?;

    let jobs = parse_manifest(&contents)?;

    tracing::debug!(
        path = %path.display(),
        job_count = jobs.len(),
        "Loaded backup manifest"
    );

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"[
        {"fileId": "abc123", "mimeType": "application/pdf", "extension": "pdf", "fileName": "ledger"},
        {"fileId": "def456", "mimeType": "text/csv", "extension": "csv", "fileName": "budget"}
    ]"#;

    #[test]
    fn test_parse_manifest_preserves_order() {
        let jobs = parse_manifest(MANIFEST).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].document_id.as_str(), "abc123");
        assert_eq!(jobs[0].export_mime_type.as_str(), "application/pdf");
        assert_eq!(jobs[0].file_extension, "pdf");
        assert_eq!(jobs[0].base_file_name, "ledger");
        assert_eq!(jobs[1].document_id.as_str(), "def456");
    }

    #[test]
    fn test_parse_manifest_empty_list() {
        let jobs = parse_manifest("[]").unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_parse_manifest_missing_field() {
        let result = parse_manifest(r#"[{"fileId": "abc123", "mimeType": "application/pdf"}]"#);
        assert!(matches!(result, Err(BackupError::Manifest(_))));
    }

    #[test]
    fn test_parse_manifest_blank_document_id() {
        let result = parse_manifest(
            r#"[{"fileId": "", "mimeType": "application/pdf", "extension": "pdf", "fileName": "x"}]"#,
        );
        assert!(matches!(result, Err(BackupError::Manifest(_))));
    }

    #[test]
    fn test_load_manifest_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MANIFEST.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let jobs = load_manifest(temp_file.path()).unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let result = load_manifest("does-not-exist.json");
        assert!(matches!(result, Err(BackupError::Manifest(_))));
    }

    #[test]
    fn test_file_name() {
        let job = BackupJob::new(
            DocumentId::new("abc123").unwrap(),
            ExportMimeType::new("application/pdf").unwrap(),
            "pdf",
            "ledger",
        );
        assert_eq!(job.file_name("20240301-120000"), "20240301-120000-ledger.pdf");
    }
}
