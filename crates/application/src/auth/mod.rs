//! OAuth 2.0 login, token refresh and session management.

mod events;
mod oauth_flow;
mod refresher;
mod session;
mod token_endpoint;

pub use events::{LoginEvent, LoginObserver, NoopObserver, token_preview};
pub use oauth_flow::OAuthFlow;
pub use refresher::TokenRefresher;
pub use session::{AuthStatus, Session, TokenStatus};
