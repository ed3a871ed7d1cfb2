//! Persistence implementations.

mod credential_repository;

pub use credential_repository::FileCredentialStore;
