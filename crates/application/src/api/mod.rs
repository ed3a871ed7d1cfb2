//! Authenticated access to the Backlog REST API.

mod client;
mod endpoints;

pub use client::ApiClient;
