//! Authorization-code login with a loopback redirect.

use std::sync::Arc;
use std::time::Duration;

use bgl_domain::{AuthorizationState, CallbackFailure, CallbackOutcome, Credential, validate_space};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::events::{LoginEvent, LoginObserver, token_preview};
use super::token_endpoint::{Grant, decode_token, post_grant};
use crate::config::OAuthSettings;
use crate::context::ServiceContext;
use crate::error::AuthError;
use crate::ports::{BrowserLauncher, CallbackListener, PendingCallback};

/// Drives one interactive login.
///
/// The listener is live only between building the authorization URL and the
/// first outcome, and is shut down on every exit path before `login`
/// returns. A successful login performs exactly one token POST and one
/// credential write; every failure writes nothing.
pub struct OAuthFlow {
    context: ServiceContext,
    listener: Arc<dyn CallbackListener>,
    browser: Arc<dyn BrowserLauncher>,
    settings: OAuthSettings,
}

impl OAuthFlow {
    /// Creates a login flow.
    #[must_use]
    pub fn new(
        context: ServiceContext,
        listener: Arc<dyn CallbackListener>,
        browser: Arc<dyn BrowserLauncher>,
        settings: OAuthSettings,
    ) -> Self {
        Self {
            context,
            listener,
            browser,
            settings,
        }
    }

    /// Logs into `space` and persists the resulting tokens, replacing whatever
    /// credential was stored before.
    ///
    /// Cancelling `cancel` while waiting for the redirect ends the login with
    /// `AuthError::Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpaceFormat` or `MissingClientCredentials` before any
    /// network activity, `CallbackPortUnavailable` if the port is taken, the
    /// redirect failure (`StateMismatch`, `MissingAuthorizationCode`,
    /// `AuthenticationTimeout`, `Cancelled`), `TokenExchangeFailed` or
    /// `TokenResponseParse` from the exchange, and `ConfigPersist` if the
    /// credential cannot be saved.
    pub async fn login(
        &self,
        space: &str,
        cancel: &CancellationToken,
        observer: &dyn LoginObserver,
    ) -> Result<Credential, AuthError> {
        validate_space(space).map_err(|_| AuthError::InvalidSpaceFormat(space.to_string()))?;
        let client = self.context.client.require()?;

        let state = AuthorizationState::generate();
        let redirect_uri = self.settings.redirect_uri();
        let urls = self.context.settings.urls(space);
        let auth_url = urls.authorization_url(&client.client_id, &redirect_uri, &state);

        let mut pending = self
            .listener
            .bind(self.settings.callback_port, state)
            .await?;
        info!(port = pending.port(), "Callback listener started");

        observer.on_event(&LoginEvent::AuthorizationUrl {
            url: auth_url.clone(),
        });
        match self.browser.open(&auth_url) {
            Ok(()) => observer.on_event(&LoginEvent::BrowserOpened),
            Err(e) => {
                warn!(error = %e, "Failed to open browser");
                observer.on_event(&LoginEvent::BrowserFailed {
                    message: e.to_string(),
                });
            }
        }
        observer.on_event(&LoginEvent::WaitingForCallback {
            port: pending.port(),
            timeout: self.settings.callback_timeout,
        });

        let outcome =
            wait_for_callback(pending.as_mut(), self.settings.callback_timeout, cancel).await;
        pending.shutdown().await;
        debug!(
            cancelled = matches!(outcome, CallbackOutcome::Cancelled),
            "Callback listener stopped"
        );

        let code = match outcome {
            CallbackOutcome::Succeeded { code } => code,
            CallbackOutcome::Failed(failure) => return Err(failure.into()),
            CallbackOutcome::Cancelled => return Err(AuthError::Cancelled),
        };
        observer.on_event(&LoginEvent::CallbackReceived);

        observer.on_event(&LoginEvent::ExchangingCode);
        let response = post_grant(
            self.context.transport.as_ref(),
            &urls.token_endpoint(),
            client,
            &Grant::AuthorizationCode {
                code: &code,
                redirect_uri: &redirect_uri,
            },
        )
        .await?;
        if response.status != 200 {
            return Err(AuthError::TokenExchangeFailed {
                status: response.status,
            });
        }
        let token = decode_token(&response)?;

        let mut credential = Credential {
            space: space.to_string(),
            ..Credential::default()
        };
        credential.apply_token(&token, self.context.clock.now());
        self.context.store.save(&credential).await?;
        info!(space, "Login successful");

        observer.on_event(&LoginEvent::Completed {
            space: space.to_string(),
            token_preview: token_preview(&credential.access_token),
        });
        Ok(credential)
    }
}

/// Waits for whichever of redirect, timeout or cancellation comes first.
async fn wait_for_callback(
    pending: &mut dyn PendingCallback,
    timeout: Duration,
    cancel: &CancellationToken,
) -> CallbackOutcome {
    tokio::select! {
        result = pending.recv() => match result {
            Ok(code) => CallbackOutcome::Succeeded { code },
            Err(failure) => CallbackOutcome::Failed(failure),
        },
        () = tokio::time::sleep(timeout) => CallbackOutcome::Failed(CallbackFailure::TimedOut),
        () = cancel.cancelled() => CallbackOutcome::Cancelled,
    }
}
