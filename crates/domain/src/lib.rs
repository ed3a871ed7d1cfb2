//! bgl Domain - Core types for the Backlog CLI
//!
//! This crate defines credentials, OAuth values, HTTP request/response
//! values and Backlog resource models. Nothing here performs I/O.

pub mod auth;
pub mod backlog;
pub mod credential;
pub mod error;
pub mod http;
pub mod space;

pub use auth::{
    AuthChallenge, AuthorizationState, CallbackFailure, CallbackOutcome, CallbackParams,
    TokenResponse,
};
pub use backlog::{
    Comment, Issue, IssueStatus, ProjectStatus, User, format_comments_markdown,
    format_statuses_markdown,
};
pub use credential::Credential;
pub use error::{DomainError, DomainResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use space::{SPACE_SUFFIXES, validate_space};
