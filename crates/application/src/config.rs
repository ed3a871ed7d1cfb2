//! Injected configuration values and URL construction.

use std::fmt;
use std::time::Duration;

use bgl_domain::AuthorizationState;

use crate::error::AuthError;

/// Fixed loopback port for the OAuth redirect.
pub const DEFAULT_CALLBACK_PORT: u16 = 18765;

/// How long a login waits for the redirect.
pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Client-side timeout applied to every HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_PATH: &str = "/api/v2/oauth2/token";
const AUTHORIZE_PATH: &str = "/OAuth2AccessRequest.action";

/// OAuth client id and secret registered with Backlog.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuthClientConfig {
    /// Client id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
}

impl OAuthClientConfig {
    /// Creates a client configuration.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns true if both values are non-empty.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Fails fast when either value is missing.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingClientCredentials`.
    pub fn require(&self) -> Result<&Self, AuthError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(AuthError::MissingClientCredentials)
        }
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Replaces `https://{space}` for every request when set.
    pub base_url: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            base_url: None,
        }
    }
}

impl ClientSettings {
    /// Resolves the service URLs for a space.
    #[must_use]
    pub fn urls(&self, space: &str) -> ServiceUrls {
        ServiceUrls::for_space(space, self.base_url.as_deref())
    }
}

/// Login settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    /// Loopback port for the redirect.
    pub callback_port: u16,
    /// How long to wait for the redirect.
    pub callback_timeout: Duration,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            callback_port: DEFAULT_CALLBACK_PORT,
            callback_timeout: DEFAULT_CALLBACK_TIMEOUT,
        }
    }
}

impl OAuthSettings {
    /// The `redirect_uri` registered for the client.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}", self.callback_port)
    }
}

/// URLs of one Backlog space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    base: String,
}

impl ServiceUrls {
    /// `https://{space}`, or the override with any trailing slash removed.
    #[must_use]
    pub fn for_space(space: &str, base_override: Option<&str>) -> Self {
        let base = base_override.map_or_else(
            || format!("https://{space}"),
            |base| base.trim_end_matches('/').to_string(),
        );
        Self { base }
    }

    /// The origin every path is appended to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL of an API path such as `/api/v2/issues/X`.
    #[must_use]
    pub fn api(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Token endpoint for both grants.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        self.api(TOKEN_PATH)
    }

    /// Browser authorization URL with every query value percent-encoded.
    #[must_use]
    pub fn authorization_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        state: &AuthorizationState,
    ) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state.as_str())
            .finish();
        format!("{}{AUTHORIZE_PATH}?{query}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_authorization_url_is_encoded() {
        let urls = ServiceUrls::for_space("foo.backlog.com", None);
        let url = urls.authorization_url(
            "id with&chars",
            &OAuthSettings::default().redirect_uri(),
            &AuthorizationState::from_value("0123abcd"),
        );

        assert_eq!(
            url,
            "https://foo.backlog.com/OAuth2AccessRequest.action?response_type=code\
             &client_id=id+with%26chars\
             &redirect_uri=http%3A%2F%2Flocalhost%3A18765\
             &state=0123abcd"
        );
    }

    #[test]
    fn test_base_override() {
        let urls = ServiceUrls::for_space("foo.backlog.com", Some("http://127.0.0.1:1234/"));
        assert_eq!(urls.token_endpoint(), "http://127.0.0.1:1234/api/v2/oauth2/token");
    }

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(
            settings.urls("x.backlog.jp").api("/api/v2/issues/A-1"),
            "https://x.backlog.jp/api/v2/issues/A-1"
        );
        assert_eq!(OAuthSettings::default().callback_port, 18765);
    }

    #[test]
    fn test_client_config_require() {
        assert!(OAuthClientConfig::default().require().is_err());
        assert!(OAuthClientConfig::new("id", "").require().is_err());
        assert!(OAuthClientConfig::new("id", "secret").require().is_ok());
        assert!(format!("{:?}", OAuthClientConfig::new("id", "s3cr3t")).contains("<redacted>"));
    }
}
