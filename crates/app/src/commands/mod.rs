//! Command handlers.
//!
//! Command output goes to `out`; prompts, progress and status lines go to
//! the terminal directly.

pub mod auth;
pub mod comment;
pub mod issue;
pub mod status;

use std::io::Write;

use tokio_util::sync::CancellationToken;

use crate::cli::{AuthCommand, Command, CommentCommand, IssueCommand, StatusCommand};
use crate::context::AppContext;
use crate::error::CliResult;

/// Runs one parsed command.
///
/// # Errors
///
/// Returns the command's failure.
pub async fn run(
    command: Command,
    ctx: &AppContext,
    cancel: &CancellationToken,
    out: &mut dyn Write,
) -> CliResult {
    match command {
        Command::Auth(command) => match command {
            AuthCommand::Login { space } => auth::login(ctx, space, cancel, out).await,
            AuthCommand::Logout => auth::logout(ctx, out).await,
            AuthCommand::Refresh => auth::refresh(ctx, out).await,
            AuthCommand::Status => auth::status(ctx, out).await,
        },
        Command::Issue(command) => match command {
            IssueCommand::View { issue, output } => issue::view(ctx, &issue, output, out).await,
            IssueCommand::UpdateStatus {
                issue,
                status,
                yes,
                output,
            } => issue::update_status(ctx, &issue, status, yes, output, out).await,
        },
        Command::Comment(command) => match command {
            CommentCommand::List { issue, output } => comment::list(ctx, &issue, output, out).await,
            CommentCommand::View {
                issue,
                comment_id,
                output,
            } => comment::view(ctx, &issue, &comment_id, output, out).await,
            CommentCommand::Add {
                issue,
                content,
                yes,
                output,
            } => comment::add(ctx, &issue, content, yes, output, out).await,
        },
        Command::Status(StatusCommand::List { project, output }) => {
            status::list(ctx, &project, output, out).await
        }
    }
}
