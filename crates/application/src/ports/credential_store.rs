//! Credential store port

use async_trait::async_trait;
use bgl_domain::Credential;

use crate::error::ConfigError;

/// Persistence for the single credential record.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the credential.
    ///
    /// Returns an empty credential, not an error, when nothing has been
    /// saved yet.
    async fn load(&self) -> Result<Credential, ConfigError>;

    /// Saves the credential, creating the containing directory if needed.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save(&self, credential: &Credential) -> Result<(), ConfigError>;
}
