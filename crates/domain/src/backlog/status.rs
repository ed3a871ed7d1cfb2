//! Project status resource

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::null_as_empty;
use crate::error::{DomainError, DomainResult};

/// A status defined on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectStatus {
    /// Status id, as sent in `statusId` updates.
    pub id: i64,
    /// Owning project id.
    pub project_id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    /// Hex color, e.g. `#ed8077`.
    #[serde(deserialize_with = "null_as_empty")]
    pub color: String,
    /// Sort key.
    pub display_order: i64,
}

impl ProjectStatus {
    /// Decodes a status list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the body is not an array of statuses.
    pub fn list_from_json(body: &[u8]) -> DomainResult<Vec<Self>> {
        serde_json::from_slice(body).map_err(|e| DomainError::parse("statuses", &e))
    }
}

/// Renders a status list under a `## Status` heading.
#[must_use]
pub fn format_statuses_markdown(statuses: &[ProjectStatus]) -> String {
    let mut out = String::from("## Status\n");
    for status in statuses {
        let _ = writeln!(out, "- {} (id: {})", status.name, status.id);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_statuses_markdown() {
        let statuses = ProjectStatus::list_from_json(
            br##"[
                {"id": 1, "projectId": 9, "name": "Open", "color": "#ed8077", "displayOrder": 1000},
                {"id": 4, "projectId": 9, "name": "Closed", "color": "#b0be3c", "displayOrder": 4000}
            ]"##,
        )
        .unwrap();

        assert_eq!(statuses[1].display_order, 4000);
        assert_eq!(
            format_statuses_markdown(&statuses),
            "## Status\n- Open (id: 1)\n- Closed (id: 4)\n"
        );
    }

    #[test]
    fn test_empty_statuses() {
        assert_eq!(format_statuses_markdown(&[]), "## Status\n");
    }
}
