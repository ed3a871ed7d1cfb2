//! Shared dependencies of the auth and API use cases.

use std::sync::Arc;

use crate::config::{ClientSettings, OAuthClientConfig};
use crate::ports::{Clock, CredentialStore, HttpTransport};

/// Ports and configuration shared by `OAuthFlow`, `TokenRefresher` and
/// `ApiClient`. Cloning is cheap.
#[derive(Clone)]
pub struct ServiceContext {
    /// Credential persistence.
    pub store: Arc<dyn CredentialStore>,
    /// HTTP transport for token and API requests.
    pub transport: Arc<dyn HttpTransport>,
    /// Time source for expiry checks.
    pub clock: Arc<dyn Clock>,
    /// OAuth client id and secret.
    pub client: OAuthClientConfig,
    /// HTTP settings.
    pub settings: ClientSettings,
}

impl ServiceContext {
    /// Bundles the shared dependencies.
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        client: OAuthClientConfig,
        settings: ClientSettings,
    ) -> Self {
        Self {
            store,
            transport,
            clock,
            client,
            settings,
        }
    }
}
