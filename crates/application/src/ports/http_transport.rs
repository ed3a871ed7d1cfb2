//! HTTP transport port

use async_trait::async_trait;
use bgl_domain::{HttpRequest, HttpResponse};
use thiserror::Error;

/// Transport-level failures. None of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within the client timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// DNS resolution or connection failure.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Port for sending one HTTP request.
///
/// Implementations return every status code as a response; only failures to
/// obtain a response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and reads the whole body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
