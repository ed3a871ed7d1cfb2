//! Backlog API v2 endpoints used by the CLI.
//!
//! Every call returns the raw response body; callers decode it with the
//! domain models or print it verbatim.

use bgl_domain::HttpMethod;

use super::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /api/v2/issues/{key}`
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn get_issue(&mut self, issue: &str) -> ApiResult<Vec<u8>> {
        self.request(HttpMethod::Get, &format!("/api/v2/issues/{issue}"))
            .await
    }

    /// `PATCH /api/v2/issues/{key}` with the given form fields.
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn update_issue(
        &mut self,
        issue: &str,
        fields: &[(&str, &str)],
    ) -> ApiResult<Vec<u8>> {
        self.request_form(HttpMethod::Patch, &format!("/api/v2/issues/{issue}"), fields)
            .await
    }

    /// Sets an issue's status by id.
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn update_issue_status(&mut self, issue: &str, status_id: i64) -> ApiResult<Vec<u8>> {
        let status_id = status_id.to_string();
        self.update_issue(issue, &[("statusId", &status_id)]).await
    }

    /// `GET /api/v2/issues/{key}/comments`
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn get_comments(&mut self, issue: &str) -> ApiResult<Vec<u8>> {
        self.request(HttpMethod::Get, &format!("/api/v2/issues/{issue}/comments"))
            .await
    }

    /// `GET /api/v2/issues/{key}/comments/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn get_comment(&mut self, issue: &str, comment_id: &str) -> ApiResult<Vec<u8>> {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/issues/{issue}/comments/{comment_id}"),
        )
        .await
    }

    /// `POST /api/v2/issues/{key}/comments` with form field `content`.
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn add_comment(&mut self, issue: &str, content: &str) -> ApiResult<Vec<u8>> {
        self.request_form(
            HttpMethod::Post,
            &format!("/api/v2/issues/{issue}/comments"),
            &[("content", content)],
        )
        .await
    }

    /// `GET /api/v2/projects/{key}/statuses`
    ///
    /// # Errors
    /// See [`ApiClient::request_form`].
    pub async fn get_project_statuses(&mut self, project: &str) -> ApiResult<Vec<u8>> {
        self.request(
            HttpMethod::Get,
            &format!("/api/v2/projects/{project}/statuses"),
        )
        .await
    }

    /// Browser URL of a comment.
    #[must_use]
    pub fn comment_url(&self, issue: &str, comment_id: i64) -> String {
        format!("https://{}/view/{issue}#comment-{comment_id}", self.space())
    }
}
