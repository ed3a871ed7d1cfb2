//! Terminal status messages and progress indicators.
//!
//! Status lines go to stderr so piped stdout only carries command output.

use std::error::Error;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message with a green checkmark
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        eprintln!("{} {}", console::style("✓").green().bold(), format!($($arg)*))
    };
}

/// Print an info message with a cyan arrow
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        eprintln!("{} {}", console::style("→").cyan(), format!($($arg)*))
    };
}

/// Print a warning message with a yellow warning symbol
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        eprintln!("{} {}", console::style("⚠").yellow().bold(), format!($($arg)*))
    };
}

/// Print a dimmed detail message (indented)
#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        eprintln!("  {}", console::style(format!($($arg)*)).dim())
    };
}

/// Prints an error in red followed by its source chain, dimmed.
pub fn print_error(err: &dyn Error) {
    eprintln!("{} {}", style("Error:").red().bold(), err);

    let mut source = err.source();
    while let Some(cause) = source {
        // thiserror `#[error(transparent)]` and "{0}" wrappers repeat the cause
        if !err.to_string().contains(&cause.to_string()) {
            eprintln!("  {} {}", style("→").dim(), style(cause).dim());
        }
        source = cause.source();
    }
}

/// Creates a ticking spinner on stderr. Hidden when stderr is not a terminal.
#[must_use]
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(spinner_style);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
