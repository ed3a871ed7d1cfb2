//! `bgl comment` commands.

use std::io::Write;

use bgl_domain::{Comment, format_comments_markdown};

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::output::{write_markdown, write_raw};
use crate::prompt;

/// Lists the comments of an issue.
///
/// # Errors
///
/// Returns the API or decoding failure.
pub async fn list(
    ctx: &AppContext,
    issue_key: &str,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let mut client = ctx.api_client().await?;
    let body = client.get_comments(issue_key).await?;

    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }
    let comments = Comment::list_from_json(&body)?;
    if comments.is_empty() {
        writeln!(out, "No comments found.")?;
        return Ok(());
    }
    write_markdown(out, &format_comments_markdown(&comments))?;
    Ok(())
}

/// Shows one comment.
///
/// # Errors
///
/// Returns the API or decoding failure.
pub async fn view(
    ctx: &AppContext,
    issue_key: &str,
    comment_id: &str,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let mut client = ctx.api_client().await?;
    let body = client.get_comment(issue_key, comment_id).await?;

    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }
    let comment = Comment::from_json(&body)?;
    write_markdown(out, &comment.to_markdown())?;
    Ok(())
}

/// Adds a comment, prompting for the text when `content` is absent.
///
/// The text and confirmation are collected before connecting.
///
/// # Errors
///
/// Returns `EmptyComment` for blank text, or the API or decoding failure.
pub async fn add(
    ctx: &AppContext,
    issue_key: &str,
    content: Option<String>,
    yes: bool,
    output: OutputArgs,
    out: &mut dyn Write,
) -> CliResult {
    let content = match content.filter(|c| !c.is_empty()) {
        Some(content) => prompt::non_empty_comment(content)?,
        None => prompt::comment_content()?,
    };

    if !yes {
        eprintln!("Issue: {issue_key}\nContent:\n{content}\n");
        if !prompt::confirm("Add Comment?")? {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }

    let mut client = ctx.api_client().await?;
    let body = client.add_comment(issue_key, &content).await?;

    if output.raw {
        write_raw(out, &body)?;
        return Ok(());
    }
    let comment = Comment::from_json(&body)?;
    writeln!(out, "Comment added successfully!")?;
    writeln!(out, "URL: {}", client.comment_url(issue_key, comment.id))?;
    Ok(())
}
