//! Composition root: wires the adapters into the use cases.

use std::sync::Arc;

use bgl_application::ports::{BrowserLauncher, CallbackListener, CredentialStore};
use bgl_application::{
    ApiClient, ClientSettings, OAuthClientConfig, OAuthFlow, OAuthSettings, ServiceContext,
    Session, TokenRefresher,
};
use bgl_infrastructure::{
    FileCredentialStore, LoopbackCallbackListener, ReqwestTransport, SystemBrowser, SystemClock,
    load_client_config, load_client_settings,
};
use tracing::debug;

use crate::error::CliResult;

/// Everything a command needs.
#[derive(Clone)]
pub struct AppContext {
    service: ServiceContext,
    oauth: OAuthSettings,
    listener: Arc<dyn CallbackListener>,
    browser: Arc<dyn BrowserLauncher>,
}

impl AppContext {
    /// Builds the context from the environment and the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// HTTP client cannot be created.
    pub fn from_env() -> CliResult<Self> {
        let store = FileCredentialStore::from_default_location()?;
        debug!(path = %store.path().display(), "Using credential file");
        Self::new(
            Arc::new(store),
            load_client_config(),
            load_client_settings(),
            OAuthSettings::default(),
        )
    }

    /// Builds a context over explicit configuration with the system clock,
    /// browser and loopback listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        client: OAuthClientConfig,
        settings: ClientSettings,
        oauth: OAuthSettings,
    ) -> CliResult<Self> {
        let transport = ReqwestTransport::new(&settings)?;
        Ok(Self {
            service: ServiceContext::new(
                store,
                Arc::new(transport),
                Arc::new(SystemClock::new()),
                client,
                settings,
            ),
            oauth,
            listener: Arc::new(LoopbackCallbackListener::new()),
            browser: Arc::new(SystemBrowser),
        })
    }

    /// Replaces the browser launcher.
    #[must_use]
    pub fn with_browser(mut self, browser: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    /// The login flow.
    #[must_use]
    pub fn oauth_flow(&self) -> OAuthFlow {
        OAuthFlow::new(
            self.service.clone(),
            Arc::clone(&self.listener),
            Arc::clone(&self.browser),
            self.oauth.clone(),
        )
    }

    /// The token refresher.
    #[must_use]
    pub fn refresher(&self) -> TokenRefresher {
        TokenRefresher::new(self.service.clone())
    }

    /// Logout and status operations.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(
            Arc::clone(&self.service.store),
            Arc::clone(&self.service.clock),
        )
    }

    /// Connects an API client with the stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or a proactive refresh fails.
    pub async fn api_client(&self) -> CliResult<ApiClient> {
        Ok(ApiClient::connect(self.service.clone()).await?)
    }
}
