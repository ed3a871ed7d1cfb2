//! bgl - A command line tool for Backlog
//!
//! The binary parses arguments, initializes logging and hands off to
//! [`commands::run`] with a context built by [`AppContext::from_env`].

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
pub mod prompt;
pub mod ui;

pub use cli::Cli;
pub use context::AppContext;
pub use error::{CliError, CliResult};
