//! Refresh-token grant.

use bgl_domain::Credential;
use tracing::{info, warn};

use super::token_endpoint::{Grant, decode_token, post_grant};
use crate::context::ServiceContext;
use crate::error::AuthError;

/// Exchanges the stored refresh token for a new token pair.
///
/// Used proactively when `ApiClient` is built with an expired token and
/// reactively after a 401 expiry challenge.
#[derive(Clone)]
pub struct TokenRefresher {
    context: ServiceContext,
}

impl TokenRefresher {
    /// Creates a refresher.
    #[must_use]
    pub const fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Refreshes and persists the stored credential.
    ///
    /// Performs exactly one POST and at most one write. Nothing is written on
    /// any failure.
    ///
    /// # Errors
    ///
    /// Returns `NoRefreshToken` if none is stored, `MissingClientCredentials`
    /// if the client is not configured, `RefreshRejected` on a non-200 status,
    /// `TokenResponseParse` on a bad body and `ConfigPersist` if the
    /// credential cannot be read or written.
    pub async fn refresh(&self) -> Result<Credential, AuthError> {
        let mut credential = self.context.store.load().await?;
        if !credential.can_refresh() {
            return Err(AuthError::NoRefreshToken);
        }
        let client = self.context.client.require()?;

        let urls = self.context.settings.urls(&credential.space);
        let response = post_grant(
            self.context.transport.as_ref(),
            &urls.token_endpoint(),
            client,
            &Grant::RefreshToken {
                refresh_token: &credential.refresh_token,
            },
        )
        .await?;
        if response.status != 200 {
            warn!(status = response.status, "Token refresh rejected");
            return Err(AuthError::RefreshRejected {
                status: response.status,
            });
        }
        let token = decode_token(&response)?;

        credential.apply_token(&token, self.context.clock.now());
        self.context.store.save(&credential).await?;
        info!(space = %credential.space, "Access token refreshed");
        Ok(credential)
    }
}
