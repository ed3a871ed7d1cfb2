//! Application error types

use std::path::PathBuf;

use bgl_domain::{CallbackFailure, DomainError};
use thiserror::Error;

use crate::ports::TransportError;

/// Errors reading or writing the persisted credential.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor a home directory is available.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// Filesystem failure.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file exists but is not a valid credential record.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// The credential could not be encoded.
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Authentication failures. All are terminal for the current command.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No access token is stored.
    #[error("not logged in. Please run 'bgl auth login' first")]
    NotAuthenticated,

    /// The space does not end in an accepted suffix.
    #[error(
        "invalid space format: must be <your-space-key>.backlog.com or <your-space-key>.backlog.jp"
    )]
    InvalidSpaceFormat(String),

    /// Client id or secret were not configured.
    #[error("OAuth client credentials are not configured. Set BGL_CLIENT_ID and BGL_CLIENT_SECRET")]
    MissingClientCredentials,

    /// The loopback port could not be bound.
    #[error("failed to start callback server on port {port}: {message}")]
    CallbackPortUnavailable {
        /// The fixed callback port.
        port: u16,
        /// OS error message.
        message: String,
    },

    /// The loopback listener failed after binding.
    #[error("callback listener failed: {0}")]
    CallbackListener(String),

    /// The redirect carried a different `state`.
    #[error("state mismatch in authorization callback")]
    StateMismatch,

    /// The redirect carried no `code`.
    #[error("no authorization code received")]
    MissingAuthorizationCode,

    /// No redirect arrived in time.
    #[error("authentication timeout")]
    AuthenticationTimeout,

    /// The user cancelled the wait.
    #[error("cancelled by user")]
    Cancelled,

    /// The token endpoint could not be reached.
    #[error("token request failed: {0}")]
    Transport(#[source] TransportError),

    /// The token endpoint rejected the authorization code.
    #[error("token request failed with status: {status}")]
    TokenExchangeFailed {
        /// HTTP status.
        status: u16,
    },

    /// The token endpoint answered 200 with an unreadable body.
    #[error("failed to parse token response: {0}")]
    TokenResponseParse(String),

    /// No refresh token is stored.
    #[error("no refresh token found. Please run 'bgl auth login' first")]
    NoRefreshToken,

    /// The token endpoint rejected the refresh token.
    #[error("token refresh failed with status: {status}")]
    RefreshRejected {
        /// HTTP status.
        status: u16,
    },

    /// The refresh run while constructing the API client failed.
    #[error("failed to refresh token: {0}")]
    TokenRefreshFailed(#[source] Box<Self>),

    /// The server reported the access token as invalid.
    #[error("access token is invalid. Please run 'bgl auth login'")]
    InvalidToken,

    /// Reading or writing the credential failed.
    #[error("config error: {0}")]
    ConfigPersist(#[from] ConfigError),
}

impl From<CallbackFailure> for AuthError {
    fn from(failure: CallbackFailure) -> Self {
        match failure {
            CallbackFailure::StateMismatch { .. } => Self::StateMismatch,
            CallbackFailure::MissingCode => Self::MissingAuthorizationCode,
            CallbackFailure::TimedOut => Self::AuthenticationTimeout,
            CallbackFailure::Listener(message) => Self::CallbackListener(message),
        }
    }
}

/// Failures of an authenticated API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed in a way the user must fix by logging in.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 401 without a refreshable challenge, or again after the single retry.
    #[error("authentication failed (status {status}). Please run 'bgl auth login'")]
    AuthenticationFailed {
        /// HTTP status.
        status: u16,
    },

    /// Any other unexpected status.
    #[error("API request failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// Connection, DNS or timeout failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The credential could not be reloaded.
    #[error("failed to reload config: {0}")]
    Config(#[from] ConfigError),

    /// The response body did not decode.
    #[error(transparent)]
    Parse(#[from] DomainError),
}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
