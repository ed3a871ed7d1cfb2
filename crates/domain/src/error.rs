//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The space domain does not end in one of the accepted suffixes.
    #[error(
        "invalid space format: must be <your-space-key>.backlog.com or <your-space-key>.backlog.jp"
    )]
    InvalidSpaceFormat(String),

    /// A response body could not be decoded into the expected resource.
    #[error("failed to parse {resource}: {message}")]
    Parse {
        /// The resource being decoded (e.g. "issue").
        resource: &'static str,
        /// Decoder message.
        message: String,
    },
}

impl DomainError {
    /// Builds a parse error for the given resource from a serde error.
    #[must_use]
    pub fn parse(resource: &'static str, error: &serde_json::Error) -> Self {
        Self::Parse {
            resource,
            message: error.to_string(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
