//! Interactive prompts.

use bgl_domain::{ProjectStatus, validate_space};
use dialoguer::{Confirm, Input, Select};

use crate::error::{CliError, CliResult};

/// Asks for the space domain until it is valid.
///
/// # Errors
///
/// Returns `CliError::Prompt` if the terminal cannot be read.
pub fn space() -> CliResult<String> {
    let space = Input::<String>::new()
        .with_prompt("Enter your Backlog space (e.g. myspace.backlog.com)")
        .validate_with(|input: &String| validate_space(input.trim()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(space.trim().to_string())
}

/// Asks for comment text.
///
/// # Errors
///
/// Returns `CliError::EmptyComment` if nothing but whitespace was entered.
pub fn comment_content() -> CliResult<String> {
    let content = Input::<String>::new()
        .with_prompt("Comment")
        .allow_empty(true)
        .interact_text()?;
    non_empty_comment(content)
}

/// Rejects blank comment text.
///
/// # Errors
///
/// Returns `CliError::EmptyComment` for blank text.
pub fn non_empty_comment(content: String) -> CliResult<String> {
    if content.trim().is_empty() {
        return Err(CliError::EmptyComment);
    }
    Ok(content)
}

/// Asks a yes/no question, defaulting to no.
///
/// # Errors
///
/// Returns `CliError::Prompt` if the terminal cannot be read.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Lets the user pick one of `statuses`, starting at `current`.
///
/// # Errors
///
/// Returns `CliError::Prompt` if the terminal cannot be read.
pub fn select_status<'a>(
    statuses: &'a [ProjectStatus],
    current: Option<i64>,
) -> CliResult<&'a ProjectStatus> {
    let items: Vec<String> = statuses
        .iter()
        .map(|s| format!("{} (id: {})", s.name, s.id))
        .collect();
    let default = current
        .and_then(|id| statuses.iter().position(|s| s.id == id))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Select a status")
        .items(&items)
        .default(default)
        .interact()?;
    statuses.get(index).ok_or_else(|| {
        CliError::Prompt(dialoguer::Error::IO(std::io::Error::other(
            "invalid selection",
        )))
    })
}
