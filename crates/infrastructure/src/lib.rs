//! bgl Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer:
//! - File-backed and in-memory credential stores
//! - The reqwest HTTP transport
//! - The loopback OAuth callback listener
//! - System clock and browser launcher
//! - Environment and build-time configuration

pub mod adapters;
pub mod auth;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestTransport, SystemBrowser, SystemClock};
pub use auth::LoopbackCallbackListener;
pub use config::{config_dir, credential_path, load_client_config, load_client_settings};
pub use persistence::FileCredentialStore;
pub use serialization::{
    SerializationError, from_json_bytes, pretty_json, to_json_stable, to_json_stable_bytes,
};
