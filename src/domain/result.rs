//! Result type alias for drive-backup

use super::errors::BackupError;

/// Result type alias for drive-backup operations
///
/// # Examples
///
/// ```
/// use drive_backup::domain::result::Result;
/// use drive_backup::domain::errors::BackupError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BackupError::Manifest("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BackupError>;
