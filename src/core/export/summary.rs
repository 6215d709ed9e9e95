//! Backup summary and reporting
//!
//! This module defines structures for tracking and reporting backup results.

use crate::domain::{BackupError, BackupJob};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one backup job
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Job as listed in the manifest
    pub job: BackupJob,

    /// Name of the output file, `{timestamp}-{fileName}.{extension}`
    pub file_name: String,

    /// Success or failure of the export
    pub status: JobStatus,
}

/// Terminal state of a job
#[derive(Debug, Clone)]
pub enum JobStatus {
    /// Export fully written to `path`
    Completed { path: PathBuf, bytes: u64 },

    /// Export failed; a partial file may remain
    Failed(ExportError),
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, JobStatus::Completed { .. })
    }
}

/// Summary of a backup run
#[derive(Debug, Clone, Default)]
pub struct BackupSummary {
    /// Number of jobs in the manifest
    pub total_jobs: usize,

    /// Number of exports written completely
    pub successful: usize,

    /// Number of failed exports
    pub failed: usize,

    /// Wall time of the run
    pub duration: Duration,

    /// Per-job outcomes, in manifest order
    pub outcomes: Vec<JobOutcome>,
}

impl BackupSummary {
    /// Create a new empty backup summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a job outcome
    pub fn record(&mut self, outcome: JobOutcome) {
        self.total_jobs += 1;
        if outcome.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Errors of the failed jobs
    pub fn failures(&self) -> impl Iterator<Item = (&JobOutcome, &ExportError)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.status {
            JobStatus::Failed(error) => Some((outcome, error)),
            JobStatus::Completed { .. } => None,
        })
    }

    /// Check if every job succeeded
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_jobs == 0 {
            return 100.0;
        }
        (self.successful as f64 / self.total_jobs as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total_jobs,
            successful = self.successful,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Backup completed"
        );

        if !self.is_successful() {
            tracing::warn!(error_count = self.failed, "Backup completed with errors");
            for (outcome, error) in self.failures() {
                tracing::warn!(
                    document_id = %outcome.job.document_id,
                    file = %outcome.file_name,
                    error_type = ?error.error_type,
                    message = %error.message,
                    "Backup error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// The export request was rejected or its stream broke
    ExportRequest,
    /// The destination file could not be created or written
    StreamWrite,
    /// The job task ended abnormally
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }
}

impl From<&BackupError> for ExportError {
    fn from(err: &BackupError) -> Self {
        let error_type = match err {
            BackupError::ExportRequestFailed(_) => ExportErrorType::ExportRequest,
            BackupError::StreamWriteFailed(_) => ExportErrorType::StreamWrite,
            _ => ExportErrorType::Unknown,
        };
        Self::new(error_type, err.to_string())
    }
}
