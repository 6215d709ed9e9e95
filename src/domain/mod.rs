//! Domain models and types for drive-backup.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`], [`ExportMimeType`])
//! - **Backup jobs** ([`BackupJob`]) and manifest loading
//! - **Error types** ([`BackupError`])
//! - **Result type alias** ([`Result`])
//! - **Error context** ([`context::ResultExt`])
//!
//! # Loading a manifest
//!
//! ```rust,no_run
//! use drive_backup::domain::load_manifest;
//!
//! # fn example() -> drive_backup::domain::Result<()> {
//! let jobs = load_manifest("backup_file_list.json")?;
//! for job in &jobs {
//!     println!("{} as {}", job.document_id, job.export_mime_type);
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod job;
pub mod result;

pub use errors::BackupError;
pub use ids::{DocumentId, ExportMimeType};
pub use job::{load_manifest, parse_manifest, BackupJob};
pub use result::Result;
