//! Persisted credential record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::TokenResponse;

/// The credential persisted between CLI invocations.
///
/// Serialized as `{space, access_token, refresh_token, expires_at}`. Missing
/// fields decode to their empty values so an older or hand-edited file still
/// loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Space domain, e.g. `foo.backlog.com`.
    #[serde(default)]
    pub space: String,
    /// Bearer token; empty when logged out.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token; empty when logged out.
    #[serde(default)]
    pub refresh_token: String,
    /// Absolute expiry as epoch milliseconds. `0` means unknown.
    #[serde(default)]
    pub expires_at: i64,
}

impl Credential {
    /// Returns true if an access token is present.
    ///
    /// An empty access token always means "not authenticated", whatever the
    /// other fields hold.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Returns true if a refresh token is present.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Returns true if the expiry is known and not after `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > 0 && now.timestamp_millis() >= self.expires_at
    }

    /// Milliseconds until expiry, or None if the expiry is unknown.
    #[must_use]
    pub fn millis_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        (self.expires_at > 0).then(|| self.expires_at - now.timestamp_millis())
    }

    /// Overwrites the token fields from a token endpoint response.
    ///
    /// A response without a refresh token keeps the stored one.
    pub fn apply_token(&mut self, token: &TokenResponse, now: DateTime<Utc>) {
        self.access_token.clone_from(&token.access_token);
        if !token.refresh_token.is_empty() {
            self.refresh_token.clone_from(&token.refresh_token);
        }
        self.expires_at = token.expires_at_millis(now);
    }

    /// Clears the tokens and expiry, keeping the space.
    pub fn clear_tokens(&mut self) {
        self.access_token.clear();
        self.refresh_token.clear();
        self.expires_at = 0;
    }
}
