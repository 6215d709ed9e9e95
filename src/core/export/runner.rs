//! Concurrent export runner
//!
//! Every job runs as its own task. Tasks are all started before any is
//! awaited, so exports overlap; a failing job never affects its siblings.

use super::clock::{format_timestamp, Clock, SystemClock};
use super::summary::{BackupSummary, ExportError, ExportErrorType, JobOutcome, JobStatus};
use crate::adapters::drive::DocumentExporter;
use crate::domain::context::ResultExt;
use crate::domain::{BackupError, BackupJob, Result};
use crate::{log_export_done, log_export_failed};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;

/// Runs backup jobs against a [`DocumentExporter`]
pub struct ExportRunner {
    exporter: Arc<dyn DocumentExporter>,
    backup_dir: PathBuf,
    clock: Arc<dyn Clock>,
    limit: Option<Arc<Semaphore>>,
}

impl ExportRunner {
    /// Create a runner writing into `backup_dir`
    ///
    /// The directory is expected to exist; it is never created.
    pub fn new(exporter: Arc<dyn DocumentExporter>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            exporter,
            backup_dir: backup_dir.into(),
            clock: Arc::new(SystemClock),
            limit: None,
        }
    }

    /// Use `clock` for output file timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Cap the number of exports in flight; `None` is unlimited
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.limit = max.filter(|n| *n > 0).map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Export every job and wait for all of them
    pub async fn run(&self, jobs: &[BackupJob]) -> BackupSummary {
        let start_time = Instant::now();

        tracing::info!(
            job_count = jobs.len(),
            backup_dir = %self.backup_dir.display(),
            "Starting backup"
        );

        let handles: Vec<_> = jobs
            .iter()
            .cloned()
            .map(|job| {
                let exporter = Arc::clone(&self.exporter);
                let clock = Arc::clone(&self.clock);
                let limit = self.limit.clone();
                let backup_dir = self.backup_dir.clone();
                let task_job = job.clone();

                let handle = tokio::spawn(async move {
                    run_job(exporter, clock, limit, backup_dir, task_job).await
                });
                (job, handle)
            })
            .collect();

        let mut summary = BackupSummary::new();
        for (job, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(document_id = %job.document_id, error = %e, "Backup task aborted");
                    JobOutcome {
                        file_name: job.base_file_name.clone(),
                        job,
                        status: JobStatus::Failed(ExportError::new(
                            ExportErrorType::Unknown,
                            format!("Backup task aborted: {e}"),
                        )),
                    }
                }
            };
            summary.record(outcome);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }
}

async fn run_job(
    exporter: Arc<dyn DocumentExporter>,
    clock: Arc<dyn Clock>,
    limit: Option<Arc<Semaphore>>,
    backup_dir: PathBuf,
    job: BackupJob,
) -> JobOutcome {
    let file_name = job.file_name(&format_timestamp(clock.now()));
    let path = backup_dir.join(&file_name);

    // Held until the body is fully written
    let _permit = match limit {
        Some(semaphore) => semaphore.acquire_owned().await.ok(),
        None => None,
    };

    let status = match export_to_file(exporter.as_ref(), &job, &path).await {
        Ok(bytes) => {
            log_export_done!(file_name, bytes);
            JobStatus::Completed { path, bytes }
        }
        Err(e) => {
            log_export_failed!(job.document_id, file_name, e);
            JobStatus::Failed(ExportError::from(&e))
        }
    };

    JobOutcome {
        job,
        file_name,
        status,
    }
}

/// Stream one export into `path`, returning the number of bytes written
async fn export_to_file(
    exporter: &dyn DocumentExporter,
    job: &BackupJob,
    path: &Path,
) -> Result<u64> {
    // Opened before the request so an unwritable destination costs no API call
    let mut file = File::create(path).await.map_err(|e| {
        BackupError::StreamWriteFailed(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut stream = exporter
        .export(&job.document_id, &job.export_mime_type)
        .await?;

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Download of {} interrupted", path.display()))?;
        file.write_all(&chunk).await.map_err(|e| {
            BackupError::StreamWriteFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| {
        BackupError::StreamWriteFailed(format!("Failed to flush {}: {}", path.display(), e))
    })?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::drive::ExportStream;
    use crate::core::export::FixedClock;
    use crate::domain::{DocumentId, ExportMimeType};
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serves fixed bodies and records every request
    #[derive(Default)]
    struct MockExporter {
        calls: Mutex<Vec<(String, String)>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl DocumentExporter for MockExporter {
        async fn export(
            &self,
            document_id: &DocumentId,
            mime_type: &ExportMimeType,
        ) -> Result<ExportStream> {
            self.calls
                .lock()
                .unwrap()
                .push((document_id.to_string(), mime_type.to_string()));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match document_id.as_str() {
                "missing" => Err(BackupError::ExportRequestFailed(
                    "404 Not Found".to_string(),
                )),
                "broken" => Ok(futures::stream::iter(vec![
                    Ok(Bytes::from_static(b"partial")),
                    Err(BackupError::ExportRequestFailed(
                        "Stream read error".to_string(),
                    )),
                ])
                .boxed()),
                id => {
                    let body = format!("body of {id}");
                    Ok(futures::stream::iter(vec![
                        Ok(Bytes::from(body[..4].to_string())),
                        Ok(Bytes::from(body[4..].to_string())),
                    ])
                    .boxed())
                }
            }
        }
    }

    fn job(id: &str, name: &str) -> BackupJob {
        BackupJob::new(
            id.parse().unwrap(),
            "application/pdf".parse().unwrap(),
            "pdf",
            name,
        )
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_run_writes_timestamped_file() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner =
            ExportRunner::new(exporter.clone(), temp_dir.path()).with_clock(fixed_clock());

        let summary = runner.run(&[job("abc123", "ledger")]).await;

        assert!(summary.is_successful());
        let written =
            std::fs::read(temp_dir.path().join("20240301-120000-ledger.pdf")).unwrap();
        assert_eq!(written, b"body of abc123");
        assert_eq!(
            exporter.calls.lock().unwrap().as_slice(),
            &[("abc123".to_string(), "application/pdf".to_string())]
        );
    }

    #[tokio::test]
    async fn test_run_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner =
            ExportRunner::new(exporter.clone(), temp_dir.path()).with_clock(fixed_clock());

        let summary = runner
            .run(&[
                job("one", "first"),
                job("missing", "gone"),
                job("broken", "cut"),
                job("two", "second"),
            ])
            .await;

        assert_eq!(summary.total_jobs, 4);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(exporter.calls.lock().unwrap().len(), 4);

        // Outcomes keep manifest order
        let names: Vec<_> = summary
            .outcomes
            .iter()
            .map(|o| o.job.base_file_name.as_str())
            .collect();
        assert_eq!(names, ["first", "gone", "cut", "second"]);

        assert!(temp_dir.path().join("20240301-120000-first.pdf").exists());
        assert!(temp_dir.path().join("20240301-120000-second.pdf").exists());

        // Partial output is left in place
        let partial = std::fs::read(temp_dir.path().join("20240301-120000-cut.pdf")).unwrap();
        assert_eq!(partial, b"partial");
    }

    #[tokio::test]
    async fn test_run_missing_backup_dir_issues_no_requests() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner = ExportRunner::new(exporter.clone(), temp_dir.path().join("absent"))
            .with_clock(fixed_clock());

        let summary = runner.run(&[job("a", "x"), job("b", "y")]).await;

        assert_eq!(summary.failed, 2);
        assert!(exporter.calls.lock().unwrap().is_empty());
        assert!(summary
            .failures()
            .all(|(_, e)| e.error_type == ExportErrorType::StreamWrite));
        assert!(!temp_dir.path().join("absent").exists());
    }

    #[tokio::test]
    async fn test_run_exports_concurrently() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner =
            ExportRunner::new(exporter.clone(), temp_dir.path()).with_clock(fixed_clock());

        let jobs: Vec<_> = (0..5).map(|i| job(&format!("doc{i}"), &format!("f{i}"))).collect();
        let summary = runner.run(&jobs).await;

        assert!(summary.is_successful());
        assert!(exporter.peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_run_respects_concurrency_cap() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner = ExportRunner::new(exporter.clone(), temp_dir.path())
            .with_clock(fixed_clock())
            .with_max_concurrency(Some(1));

        let jobs: Vec<_> = (0..4).map(|i| job(&format!("doc{i}"), &format!("f{i}"))).collect();
        let summary = runner.run(&jobs).await;

        assert!(summary.is_successful());
        assert_eq!(exporter.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_same_name_collision() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner =
            ExportRunner::new(exporter.clone(), temp_dir.path()).with_clock(fixed_clock());

        let summary = runner
            .run(&[job("aaa", "report"), job("bbb", "report")])
            .await;

        assert_eq!(summary.total_jobs, 2);
        assert_eq!(exporter.calls.lock().unwrap().len(), 2);

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content =
            std::fs::read_to_string(temp_dir.path().join("20240301-120000-report.pdf")).unwrap();
        assert!(content == "body of aaa" || content == "body of bbb");
    }

    #[tokio::test]
    async fn test_rerun_with_same_clock_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner =
            ExportRunner::new(exporter.clone(), temp_dir.path()).with_clock(fixed_clock());
        let jobs = [job("abc123", "ledger")];

        let first = runner.run(&jobs).await;
        let second = runner.run(&jobs).await;

        assert!(first.is_successful());
        assert!(second.is_successful());
        assert_eq!(exporter.calls.lock().unwrap().len(), 2);
        assert_eq!(
            std::fs::read(temp_dir.path().join("20240301-120000-ledger.pdf")).unwrap(),
            b"body of abc123"
        );
    }

    #[tokio::test]
    async fn test_run_empty_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = Arc::new(MockExporter::default());
        let runner = ExportRunner::new(exporter.clone(), temp_dir.path());

        let summary = runner.run(&[]).await;

        assert_eq!(summary.total_jobs, 0);
        assert!(summary.is_successful());
        assert!(exporter.calls.lock().unwrap().is_empty());
    }
}
