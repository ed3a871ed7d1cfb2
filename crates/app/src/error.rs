//! Errors surfaced by CLI commands.

use bgl_application::{ApiError, AuthError, ConfigError, TransportError};
use bgl_domain::DomainError;
use thiserror::Error;

/// Any failure that ends a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Login, refresh or session failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// API request failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client setup failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response body did not decode.
    #[error(transparent)]
    Parse(#[from] DomainError),

    /// Interactive prompt failure.
    #[error("input error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Terminal write failure.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// The comment text was empty.
    #[error("comment content cannot be empty")]
    EmptyComment,

    /// Ctrl-C ended a command that does not watch for cancellation.
    #[error("interrupted")]
    Interrupted,

    /// The project has no statuses to choose from.
    #[error("no statuses found for project {0}")]
    NoStatuses(i64),
}

/// Result alias for commands.
pub type CliResult<T = ()> = Result<T, CliError>;
