//! Token endpoint response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body returned by the token endpoint for both grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The new bearer token.
    pub access_token: String,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds; `0` when the server omits it.
    #[serde(default)]
    pub expires_in: i64,
    /// The new refresh token; empty when the server omits it.
    #[serde(default)]
    pub refresh_token: String,
}

impl TokenResponse {
    /// Absolute expiry in epoch milliseconds, or `0` when the lifetime is unknown.
    #[must_use]
    pub fn expires_at_millis(&self, now: DateTime<Utc>) -> i64 {
        if self.expires_in > 0 {
            now.timestamp_millis()
                .saturating_add(self.expires_in.saturating_mul(1000))
        } else {
            0
        }
    }
}
