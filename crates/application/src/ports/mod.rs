//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the use cases and the outside world.
//! Each port is a trait implemented by an adapter in the infrastructure layer
//! and by an in-process fake in tests.

mod browser;
mod callback_listener;
mod clock;
mod credential_store;
mod http_transport;

pub use browser::BrowserLauncher;
pub use callback_listener::{CallbackListener, PendingCallback};
pub use clock::Clock;
pub use credential_store::CredentialStore;
pub use http_transport::{HttpTransport, TransportError};
