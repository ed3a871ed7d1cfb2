//! Logout and token status.

use std::sync::Arc;

use tracing::info;

use crate::error::AuthError;
use crate::ports::{Clock, CredentialStore};

/// Seconds before expiry from which a token is reported as expiring.
const EXPIRING_WINDOW_SECS: i64 = 5 * 60;

/// Operations on the stored session that need no network.
pub struct Session {
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
}

/// Stored space plus token status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    /// The space last logged into; empty if never.
    pub space: String,
    /// Token status.
    pub token: TokenStatus,
}

impl Session {
    /// Creates session operations over a store.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Clears the stored tokens and expiry, keeping the space.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if both tokens are already empty and
    /// `ConfigPersist` if the credential cannot be read or written.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let mut credential = self.store.load().await?;
        if credential.access_token.is_empty() && credential.refresh_token.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        credential.clear_tokens();
        self.store.save(&credential).await?;
        info!(space = %credential.space, "Logged out");
        Ok(())
    }

    /// Reports the stored token's status.
    ///
    /// # Errors
    ///
    /// Returns `ConfigPersist` if the credential cannot be read.
    pub async fn status(&self) -> Result<AuthStatus, AuthError> {
        let credential = self.store.load().await?;
        let now = self.clock.now();

        let token = if !credential.is_authenticated() {
            TokenStatus::NotAuthenticated
        } else if credential.is_expired_at(now) {
            TokenStatus::Expired {
                can_refresh: credential.can_refresh(),
            }
        } else {
            match credential.millis_until_expiry(now).map(|ms| ms / 1000) {
                Some(secs) if secs <= EXPIRING_WINDOW_SECS => TokenStatus::Expiring {
                    seconds_remaining: secs,
                    can_refresh: credential.can_refresh(),
                },
                seconds_remaining => TokenStatus::Valid { seconds_remaining },
            }
        };

        Ok(AuthStatus {
            space: credential.space,
            token,
        })
    }
}

/// Status of the stored token for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token is stored.
    NotAuthenticated,
    /// Token is valid and not expiring soon.
    Valid {
        /// Seconds until expiry, or None if no expiry.
        seconds_remaining: Option<i64>,
    },
    /// Token is valid but will expire soon.
    Expiring {
        /// Seconds until expiry.
        seconds_remaining: i64,
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
    /// Token has expired.
    Expired {
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Returns true if the token is valid (not expired).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. } | Self::Expiring { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not logged in".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Valid for {} hours", secs / 3600)
                } else {
                    format!("Valid for {} minutes", secs / 60)
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Valid (no expiry)".to_string(),
            Self::Expiring {
                seconds_remaining,
                can_refresh,
            } => {
                let refresh_hint = if *can_refresh {
                    " (will auto-refresh)"
                } else {
                    ""
                };
                format!("Expiring in {seconds_remaining} seconds{refresh_hint}")
            }
            Self::Expired { can_refresh } => {
                if *can_refresh {
                    "Expired (refreshed on next request)".to_string()
                } else {
                    "Expired".to_string()
                }
            }
        }
    }
}
