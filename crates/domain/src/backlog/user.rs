use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A Backlog user as embedded in issues and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Display name.
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    /// Mail address.
    #[serde(deserialize_with = "null_as_empty")]
    pub mail_address: String,
}

impl User {
    /// Renders as ``name`<mail>` `` for Markdown output.
    #[must_use]
    pub fn markdown_label(&self) -> String {
        format!("{}`<{}>`", self.name, self.mail_address)
    }
}
