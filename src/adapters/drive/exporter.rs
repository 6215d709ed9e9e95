//! Document export abstraction
//!
//! The backup runner depends on this trait rather than on the HTTP client, so
//! runs can be exercised against in-memory exporters.

use crate::domain::{DocumentId, ExportMimeType, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Body of one export, delivered in chunks
pub type ExportStream = BoxStream<'static, Result<Bytes>>;

/// Source of document exports
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Request `document_id` rendered as `mime_type`
    ///
    /// Resolves once the response has started; the body arrives through the
    /// returned stream. A rejected request is reported as
    /// [`ExportRequestFailed`](crate::domain::BackupError::ExportRequestFailed).
    async fn export(
        &self,
        document_id: &DocumentId,
        mime_type: &ExportMimeType,
    ) -> Result<ExportStream>;
}
