//! Bearer-authenticated requests with one refresh-and-retry on expiry.

use bgl_domain::{AuthChallenge, Credential, HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, info};

use crate::auth::TokenRefresher;
use crate::config::ServiceUrls;
use crate::context::ServiceContext;
use crate::error::{ApiError, ApiResult, AuthError};

/// One initial attempt plus one retry after a refresh.
const MAX_ATTEMPTS: usize = 2;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the Backlog API.
///
/// Holds a snapshot of the stored credential. It never writes the credential
/// itself; after a refresh it re-reads the store.
pub struct ApiClient {
    context: ServiceContext,
    refresher: TokenRefresher,
    credential: Credential,
    urls: ServiceUrls,
}

/// How one response is handled.
enum Disposition {
    Success,
    RefreshAndRetry,
    Fail(ApiError),
}

impl ApiClient {
    /// Loads the credential, refreshing it first if it has expired.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if no access token is stored,
    /// `TokenRefreshFailed` if the proactive refresh fails and
    /// `ConfigPersist` if the store cannot be read.
    pub async fn connect(context: ServiceContext) -> Result<Self, AuthError> {
        let mut credential = context.store.load().await?;
        if !credential.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }

        let refresher = TokenRefresher::new(context.clone());
        if credential.is_expired_at(context.clock.now()) {
            info!("Access token expired, refreshing before the first request");
            refresher
                .refresh()
                .await
                .map_err(|e| AuthError::TokenRefreshFailed(Box::new(e)))?;
            credential = context.store.load().await?;
        }

        let urls = context.settings.urls(&credential.space);
        Ok(Self {
            context,
            refresher,
            credential,
            urls,
        })
    }

    /// The space domain of the loaded credential.
    #[must_use]
    pub fn space(&self) -> &str {
        &self.credential.space
    }

    /// Sends a request without a body and returns the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request_form`].
    pub async fn request(&mut self, method: HttpMethod, path: &str) -> ApiResult<Vec<u8>> {
        self.send(method, path, None).await
    }

    /// Sends a form-encoded request and returns the response body.
    ///
    /// A 401 whose challenge reports an expired token triggers one refresh
    /// and one retry of the identical request. Nothing else is retried.
    ///
    /// # Errors
    ///
    /// Returns `Auth(InvalidToken)` for an invalid-token challenge,
    /// `Auth(TokenRefreshFailed)` if the refresh fails,
    /// `AuthenticationFailed` for any other 401 including one after the
    /// retry, `RequestFailed` for any other unexpected status and `Transport`
    /// if no response was received.
    pub async fn request_form(
        &mut self,
        method: HttpMethod,
        path: &str,
        form: &[(&str, &str)],
    ) -> ApiResult<Vec<u8>> {
        let form = form
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.send(method, path, Some(form)).await
    }

    async fn send(
        &mut self,
        method: HttpMethod,
        path: &str,
        form: Option<Vec<(String, String)>>,
    ) -> ApiResult<Vec<u8>> {
        for attempt in 1..=MAX_ATTEMPTS {
            let request = self.build_request(method, path, form.clone());
            debug!(%method, url = %request.url, attempt, "Sending API request");

            let response = self.context.transport.send(request).await?;
            debug!(%method, path, status = response.status, "API response");

            match classify(method, &response) {
                Disposition::Success => return Ok(response.body),
                Disposition::RefreshAndRetry if attempt < MAX_ATTEMPTS => {
                    info!(path, "Access token expired, refreshing and retrying once");
                    self.refresh().await?;
                }
                Disposition::RefreshAndRetry => break,
                Disposition::Fail(error) => return Err(error),
            }
        }

        Err(ApiError::AuthenticationFailed { status: 401 })
    }

    async fn refresh(&mut self) -> ApiResult<()> {
        self.refresher
            .refresh()
            .await
            .map_err(|e| AuthError::TokenRefreshFailed(Box::new(e)))?;
        self.credential = self.context.store.load().await?;
        Ok(())
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        form: Option<Vec<(String, String)>>,
    ) -> HttpRequest {
        let request = HttpRequest::new(method, self.urls.api(path)).with_header(
            "Authorization",
            format!("Bearer {}", self.credential.access_token),
        );
        match form {
            Some(form) => request
                .with_header("Content-Type", FORM_CONTENT_TYPE)
                .with_form(form),
            None => request,
        }
    }
}

fn classify(method: HttpMethod, response: &HttpResponse) -> Disposition {
    if response.status == 401 {
        return match AuthChallenge::from_header(response.header("www-authenticate")) {
            AuthChallenge::Expired => Disposition::RefreshAndRetry,
            AuthChallenge::Invalid => Disposition::Fail(AuthError::InvalidToken.into()),
            AuthChallenge::Unrecognized => Disposition::Fail(ApiError::AuthenticationFailed {
                status: response.status,
            }),
        };
    }

    if method.accepts(response.status) {
        Disposition::Success
    } else {
        Disposition::Fail(ApiError::RequestFailed {
            status: response.status,
            body: response.body_text(),
        })
    }
}
