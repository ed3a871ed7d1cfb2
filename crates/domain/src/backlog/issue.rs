//! Issue resource

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{User, null_as_empty};
use crate::error::{DomainError, DomainResult};

/// Status embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueStatus {
    /// Status id.
    pub id: i64,
    /// Status name.
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
}

/// A Backlog issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    /// Owning project id.
    pub project_id: i64,
    /// One-line summary.
    #[serde(deserialize_with = "null_as_empty")]
    pub summary: String,
    /// Free-form description; may be empty.
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    /// Assigned user, if any.
    pub assignee: Option<User>,
    /// Current status, if reported.
    pub status: Option<IssueStatus>,
}

impl Issue {
    /// Decodes an issue from a response body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the body is not an issue object.
    pub fn from_json(body: &[u8]) -> DomainResult<Self> {
        serde_json::from_slice(body).map_err(|e| DomainError::parse("issue", &e))
    }

    /// Renders the issue as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## Metadata\n");
        let _ = writeln!(out, "- Project ID: {}", self.project_id);
        match &self.status {
            Some(status) => {
                let _ = writeln!(out, "- Status: {}", status.name);
            }
            None => out.push_str("- Status: (unknown)\n"),
        }
        match &self.assignee {
            Some(user) => {
                let _ = writeln!(out, "- Assignee: {}", user.markdown_label());
            }
            None => out.push_str("- Assignee: (unassigned)\n"),
        }
        out.push('\n');

        let _ = write!(out, "## Summary\n\n{}\n\n", self.summary);

        out.push_str("## Description\n\n");
        if self.description.is_empty() {
            out.push_str("(no description)");
        } else {
            out.push_str(&self.description);
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_issue_markdown() {
        let body = br#"{
            "id": 1,
            "projectId": 42,
            "issueKey": "BLG-1",
            "summary": "Fix login",
            "description": "Steps:\n1. open",
            "assignee": {"id": 7, "name": "Alice", "mailAddress": "alice@example.com"},
            "status": {"id": 2, "name": "In Progress"}
        }"#;
        let issue = Issue::from_json(body).unwrap();

        assert_eq!(
            issue.to_markdown(),
            "## Metadata\n\
             - Project ID: 42\n\
             - Status: In Progress\n\
             - Assignee: Alice`<alice@example.com>`\n\
             \n\
             ## Summary\n\nFix login\n\n\
             ## Description\n\nSteps:\n1. open\n"
        );
    }

    #[test]
    fn test_sparse_issue_markdown() {
        let issue = Issue::from_json(
            br#"{"projectId": 3, "summary": "S", "description": null, "assignee": null}"#,
        )
        .unwrap();

        assert_eq!(
            issue.to_markdown(),
            "## Metadata\n\
             - Project ID: 3\n\
             - Status: (unknown)\n\
             - Assignee: (unassigned)\n\
             \n\
             ## Summary\n\nS\n\n\
             ## Description\n\n(no description)\n"
        );
    }

    #[test]
    fn test_rejects_non_object() {
        let err = Issue::from_json(b"[1, 2]").unwrap_err();
        assert!(matches!(err, DomainError::Parse { resource: "issue", .. }));
    }
}
