//! `bgl issue` commands.

use std::io::Write;

use bgl_domain::{Issue, ProjectStatus};

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{write_markdown, write_raw};
use crate::prompt;

/// Shows an issue.
///
/// # Errors
///
/// Returns the API or decoding failure.
pub async fn view(
    ctx: &AppContext,
    issue_key: &str,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let mut client = ctx.api_client().await?;
    let body = client.get_issue(issue_key).await?;

    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }
    let issue = Issue::from_json(&body)?;
    write_markdown(out, &issue.to_markdown())?;
    Ok(())
}

/// Changes an issue's status, selecting it interactively when `status_id`
/// is absent.
///
/// # Errors
///
/// Returns the API, decoding or prompt failure.
pub async fn update_status(
    ctx: &AppContext,
    issue_key: &str,
    status_id: Option<i64>,
    yes: bool,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let mut client = ctx.api_client().await?;

    let (status_id, label) = if let Some(id) = status_id {
        (id, format!("status {id}"))
    } else {
        let issue = Issue::from_json(&client.get_issue(issue_key).await?)?;
        let body = client
            .get_project_statuses(&issue.project_id.to_string())
            .await?;
        let statuses = ProjectStatus::list_from_json(&body)?;
        if statuses.is_empty() {
            return Err(CliError::NoStatuses(issue.project_id));
        }
        let selected = prompt::select_status(&statuses, issue.status.as_ref().map(|s| s.id))?;
        (selected.id, format!("'{}'", selected.name))
    };

    if !yes && !prompt::confirm(&format!("Change the status of {issue_key} to {label}?"))? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    let body = client.update_issue_status(issue_key, status_id).await?;
    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }

    let issue = Issue::from_json(&body)?;
    writeln!(out, "Status updated successfully!")?;
    writeln!(out, "URL: https://{}/view/{issue_key}", client.space())?;
    writeln!(out)?;
    write_markdown(out, &issue.to_markdown())?;
    Ok(())
}
