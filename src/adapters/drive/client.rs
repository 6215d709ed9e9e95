//! Google Drive v3 API client

use super::exporter::{DocumentExporter, ExportStream};
use super::models::FileList;
use crate::adapters::oauth::AuthenticatedClient;
use crate::domain::{BackupError, DocumentId, ExportMimeType, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client, Response, StatusCode};
use std::sync::Arc;
use url::Url;

/// Drive v3 endpoint
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested by [`DriveClient::list_files`]
const LIST_FIELDS: &str = "nextPageToken, files(id, name)";

/// Drive API client authenticated with a stored OAuth token
pub struct DriveClient {
    http: Client,
    base_url: Url,
    auth: Arc<AuthenticatedClient>,
}

impl DriveClient {
    /// Create a client against `base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `base_url` is not a valid absolute
    /// URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, auth: Arc<AuthenticatedClient>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BackupError::Configuration(format!("Invalid Drive API URL {base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackupError::Configuration(format!(
                "Drive API URL cannot be used as a base: {base_url}"
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("drive-backup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackupError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// List up to `page_size` files visible to the user
    pub async fn list_files(&self, page_size: u32) -> Result<FileList> {
        let url = self.endpoint(&["files"]);
        let auth = self.auth.auth_header().await?;
        let page_size = page_size.to_string();

        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, auth)
            .query(&[("pageSize", page_size.as_str()), ("fields", LIST_FIELDS)])
            .send()
            .await
            .map_err(|e| BackupError::Api(format!("Failed to list files: {e}")))?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| BackupError::Api(format!("Failed to parse response: {e}")))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(BackupError::Authentication(
                "Invalid or expired token".to_string(),
            ))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(BackupError::Api(format!("{status} - {body}")))
        }
    }
}

#[async_trait]
impl DocumentExporter for DriveClient {
    async fn export(
        &self,
        document_id: &DocumentId,
        mime_type: &ExportMimeType,
    ) -> Result<ExportStream> {
        let url = self.endpoint(&["files", document_id.as_str(), "export"]);
        let auth = self.auth.auth_header().await.map_err(|e| {
            BackupError::ExportRequestFailed(format!("Failed to authorize request: {e}"))
        })?;

        tracing::debug!(document_id = %document_id, mime_type = %mime_type, "Requesting export");

        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, auth)
            .query(&[("mimeType", mime_type.as_str())])
            .send()
            .await
            .map_err(|e| BackupError::ExportRequestFailed(format!("Failed to start export: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackupError::ExportRequestFailed(format!(
                "{status} - {body}"
            )));
        }

        let stream = response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| BackupError::ExportRequestFailed(format!("Stream read error: {e}")))
        });

        Ok(stream.boxed())
    }
}
