//! Domain identifier types with validation
//!
//! Newtype wrappers for the two values that together address one exportable
//! document form. Both must be non-empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Google Drive document identifier
///
/// Opaque to drive-backup; only emptiness is checked.
///
/// # Examples
///
/// ```
/// use drive_backup::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms").unwrap();
/// assert_eq!(id.as_str(), "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Export MIME type requested from the Drive export endpoint
///
/// # Examples
///
/// ```
/// use drive_backup::domain::ids::ExportMimeType;
///
/// let mime = ExportMimeType::new("application/pdf").unwrap();
/// assert_eq!(mime.to_string(), "application/pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExportMimeType(String);

impl ExportMimeType {
    /// Creates a new ExportMimeType, rejecting blank values
    pub fn new(mime: impl Into<String>) -> Result<Self, String> {
        let mime = mime.into();
        if mime.trim().is_empty() {
            return Err("Export MIME type cannot be empty".to_string());
        }
        Ok(Self(mime))
    }

    /// Returns the MIME type as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExportMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExportMimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ExportMimeType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExportMimeType> for String {
    fn from(mime: ExportMimeType) -> Self {
        mime.0
    }
}
