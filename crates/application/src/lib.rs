//! bgl Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (credential store, HTTP transport, clock, browser, callback listener)
//! - The OAuth login flow, token refresher and session operations
//! - The authenticated API client
//! - Application-level error handling

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod test_support;

pub use api::ApiClient;
pub use auth::{
    AuthStatus, LoginEvent, LoginObserver, NoopObserver, OAuthFlow, Session, TokenRefresher,
    TokenStatus,
};
pub use config::{ClientSettings, OAuthClientConfig, OAuthSettings, ServiceUrls};
pub use context::ServiceContext;
pub use error::{ApiError, ApiResult, AuthError, ConfigError};
pub use ports::{
    BrowserLauncher, CallbackListener, Clock, CredentialStore, HttpTransport, PendingCallback,
    TransportError,
};
