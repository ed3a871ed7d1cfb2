//! Backlog API resources and their Markdown rendering.
//!
//! Only the fields the CLI displays are decoded; everything else in the
//! response is ignored. Missing or `null` fields decode to empty values.

mod comment;
mod issue;
mod status;
mod user;

pub use comment::{Comment, format_comments_markdown};
pub use issue::{Issue, IssueStatus};
pub use status::{ProjectStatus, format_statuses_markdown};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Decodes `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
