//! `bgl status` commands.

use std::io::Write;

use bgl_domain::{ProjectStatus, format_statuses_markdown};

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{write_markdown, write_raw};

/// Lists the statuses of a project.
///
/// # Errors
///
/// Returns the API or decoding failure.
pub async fn list(
    ctx: &AppContext,
    project: &str,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let mut client = ctx.api_client().await?;
    let body = client.get_project_statuses(project).await?;

    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }
    let statuses = ProjectStatus::list_from_json(&body)?;
    write_markdown(out, &format_statuses_markdown(&statuses))?;
    Ok(())
}
