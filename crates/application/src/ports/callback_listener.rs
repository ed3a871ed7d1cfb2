//! Loopback callback listener port

use async_trait::async_trait;
use bgl_domain::{AuthorizationState, CallbackFailure};

use crate::error::AuthError;

/// Binds the loopback listener that receives the OAuth redirect.
#[async_trait]
pub trait CallbackListener: Send + Sync {
    /// Binds `port` and starts answering redirects checked against `state`.
    ///
    /// # Errors
    /// Returns `AuthError::CallbackPortUnavailable` if the port is in use.
    async fn bind(
        &self,
        port: u16,
        state: AuthorizationState,
    ) -> Result<Box<dyn PendingCallback>, AuthError>;
}

/// A bound listener waiting for the first redirect.
#[async_trait]
pub trait PendingCallback: Send {
    /// The bound port.
    fn port(&self) -> u16;

    /// Waits for the first redirect on `/` and returns its authorization code.
    ///
    /// Cancel-safe: dropping the future before completion loses nothing.
    async fn recv(&mut self) -> Result<String, CallbackFailure>;

    /// Stops the listener and releases the port. Idempotent.
    async fn shutdown(&mut self);
}
