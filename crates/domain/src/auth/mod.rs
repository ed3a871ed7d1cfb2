//! OAuth 2.0 authorization-code types

mod callback;
mod challenge;
mod state;
mod token;

pub use callback::{CallbackFailure, CallbackOutcome, CallbackParams};
pub use challenge::AuthChallenge;
pub use state::AuthorizationState;
pub use token::TokenResponse;
