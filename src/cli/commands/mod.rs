//! CLI command implementations
//!
//! This module contains all CLI command implementations. Each command returns
//! the process exit code:
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | some backup jobs failed |
//! | 2 | configuration or manifest error |
//! | 3 | stored token missing or malformed |
//! | 4 | authentication or Drive API failure |
//! | 5 | fatal error |

pub mod authorize;
pub mod backup;
pub mod list_files;
pub mod validate;
