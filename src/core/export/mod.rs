//! Backup execution
//!
//! This module provides the core backup logic, including:
//! - Concurrent export of manifest jobs into the backup directory
//! - Timestamped output naming through an injectable clock
//! - Summary and reporting

pub mod clock;
pub mod runner;
pub mod summary;

pub use clock::{format_timestamp, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use runner::ExportRunner;
pub use summary::{BackupSummary, ExportError, ExportErrorType, JobOutcome, JobStatus};
