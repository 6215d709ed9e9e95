//! Google OAuth2 for an installed application
//!
//! - [`credentials`] - app registration and stored token models
//! - [`store`] - token file persistence
//! - [`client`] - token endpoint calls
//! - [`session`] - authenticated client with in-memory refresh
//! - [`loader`] - non-interactive credential loading for backup runs
//! - [`authorize`] - interactive consent flow

pub mod authorize;
pub mod client;
pub mod credentials;
pub mod loader;
pub mod session;
pub mod store;

pub use authorize::{prompt_for_code, InteractiveAuthorizer};
pub use client::{OAuthClient, DRIVE_SCOPE};
pub use credentials::{AppCredentials, StoredCredential};
pub use loader::CredentialLoader;
pub use session::AuthenticatedClient;
pub use store::TokenStore;
