//! Comment resource

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{User, null_as_empty};
use crate::error::{DomainError, DomainResult};

const COMMENT_SEPARATOR: &str = "\n---\n\n";

/// A comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Comment id.
    pub id: i64,
    /// Body text; empty for change-log only comments.
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    /// Author, if reported.
    pub created_user: Option<User>,
    /// Creation timestamp as sent by the server.
    #[serde(deserialize_with = "null_as_empty")]
    pub created: String,
}

impl Comment {
    /// Decodes a single comment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the body is not a comment object.
    pub fn from_json(body: &[u8]) -> DomainResult<Self> {
        serde_json::from_slice(body).map_err(|e| DomainError::parse("comment", &e))
    }

    /// Decodes a comment list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the body is not an array of comments.
    pub fn list_from_json(body: &[u8]) -> DomainResult<Vec<Self>> {
        serde_json::from_slice(body).map_err(|e| DomainError::parse("comments", &e))
    }

    /// Renders the comment as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "**Comment Id:** {}\n\n", self.id);
        out.push_str("**User:** ");
        match &self.created_user {
            Some(user) => {
                let _ = write!(out, "{}\n\n", user.markdown_label());
            }
            None => out.push_str("(unknown)\n\n"),
        }
        let _ = write!(out, "**Datetime:** {}\n\n", self.created);
        out.push_str("**Content:**\n");
        if self.content.is_empty() {
            out.push_str("(no content)");
        } else {
            out.push_str(&self.content);
        }
        out.push('\n');
        out
    }
}

/// Renders comments separated by horizontal rules.
#[must_use]
pub fn format_comments_markdown(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(Comment::to_markdown)
        .collect::<Vec<_>>()
        .join(COMMENT_SEPARATOR)
}
