//! Per-login `state` nonce.

use std::fmt;

use rand::RngCore;

use super::callback::{CallbackFailure, CallbackParams};

const NONCE_BYTES: usize = 16;

/// Single-use random nonce sent as the OAuth `state` parameter.
///
/// Lives in memory for one login attempt only and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationState(String);

impl AuthorizationState {
    /// Generates 16 random bytes, hex-encoded (32 characters).
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps a known value. Used by tests and fakes.
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the nonce as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte-for-byte comparison against a received `state`.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.0.as_bytes() == received.as_bytes()
    }

    /// Checks a redirect against this nonce and extracts the authorization code.
    ///
    /// A mismatched `state` is reported before a missing `code`.
    ///
    /// # Errors
    ///
    /// Returns `CallbackFailure::StateMismatch` or `CallbackFailure::MissingCode`.
    pub fn verify_callback(&self, params: &CallbackParams) -> Result<String, CallbackFailure> {
        let received = params.state.as_deref().unwrap_or_default();
        if !self.matches(received) {
            return Err(CallbackFailure::StateMismatch {
                received: received.to_string(),
            });
        }

        match params.code.as_deref() {
            Some(code) if !code.is_empty() => Ok(code.to_string()),
            _ => Err(CallbackFailure::MissingCode),
        }
    }
}

// The nonce is a CSRF secret for the duration of the flow.
impl fmt::Debug for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthorizationState(..)")
    }
}
