//! Google Drive integration
//!
//! - [`exporter`] - the export seam used by the backup runner
//! - [`client`] - Drive v3 HTTP client implementing it
//! - [`models`] - API response types

pub mod client;
pub mod exporter;
pub mod models;

pub use client::{DriveClient, DRIVE_API_BASE};
pub use exporter::{DocumentExporter, ExportStream};
pub use models::{DriveFile, FileList};
