//! Form POSTs to the token endpoint.

use bgl_domain::{HttpMethod, HttpRequest, HttpResponse, TokenResponse};
use tracing::debug;

use crate::config::OAuthClientConfig;
use crate::error::AuthError;
use crate::ports::HttpTransport;

/// A grant sent to the token endpoint.
pub(crate) enum Grant<'a> {
    AuthorizationCode { code: &'a str, redirect_uri: &'a str },
    RefreshToken { refresh_token: &'a str },
}

impl Grant<'_> {
    const fn name(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    fn form(&self, client: &OAuthClientConfig) -> Vec<(String, String)> {
        let mut form = vec![("grant_type".to_string(), self.name().to_string())];
        if let Self::AuthorizationCode { code, redirect_uri } = self {
            form.push(("code".to_string(), (*code).to_string()));
            form.push(("redirect_uri".to_string(), (*redirect_uri).to_string()));
        }
        form.push(("client_id".to_string(), client.client_id.clone()));
        form.push(("client_secret".to_string(), client.client_secret.clone()));
        if let Self::RefreshToken { refresh_token } = self {
            form.push(("refresh_token".to_string(), (*refresh_token).to_string()));
        }
        form
    }
}

/// Sends one grant and returns the raw response, whatever its status.
pub(crate) async fn post_grant(
    transport: &dyn HttpTransport,
    token_url: &str,
    client: &OAuthClientConfig,
    grant: &Grant<'_>,
) -> Result<HttpResponse, AuthError> {
    debug!(grant = grant.name(), url = token_url, "Requesting token");
    let request = HttpRequest::new(HttpMethod::Post, token_url).with_form(grant.form(client));
    let response = transport.send(request).await.map_err(AuthError::Transport)?;
    debug!(grant = grant.name(), status = response.status, "Token endpoint responded");
    Ok(response)
}

/// Decodes a 200 token response.
pub(crate) fn decode_token(response: &HttpResponse) -> Result<TokenResponse, AuthError> {
    let token: TokenResponse = serde_json::from_slice(&response.body)
        .map_err(|e| AuthError::TokenResponseParse(e.to_string()))?;
    if token.access_token.is_empty() {
        return Err(AuthError::TokenResponseParse(
            "empty access_token".to_string(),
        ));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(form: &[(String, String)]) -> Vec<(&str, &str)> {
        form.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_authorization_code_form() {
        let client = OAuthClientConfig::new("id", "secret");
        let grant = Grant::AuthorizationCode {
            code: "c1",
            redirect_uri: "http://localhost:18765",
        };
        assert_eq!(
            pairs(&grant.form(&client)),
            vec![
                ("grant_type", "authorization_code"),
                ("code", "c1"),
                ("redirect_uri", "http://localhost:18765"),
                ("client_id", "id"),
                ("client_secret", "secret"),
            ]
        );
    }

    #[test]
    fn test_refresh_form() {
        let client = OAuthClientConfig::new("id", "secret");
        let grant = Grant::RefreshToken { refresh_token: "r1" };
        assert_eq!(
            pairs(&grant.form(&client)),
            vec![
                ("grant_type", "refresh_token"),
                ("client_id", "id"),
                ("client_secret", "secret"),
                ("refresh_token", "r1"),
            ]
        );
    }

    #[test]
    fn test_decode_rejects_bad_bodies() {
        assert!(matches!(
            decode_token(&HttpResponse::new(200, "not json")),
            Err(AuthError::TokenResponseParse(_))
        ));
        assert!(matches!(
            decode_token(&HttpResponse::new(200, r#"{"access_token":""}"#)),
            Err(AuthError::TokenResponseParse(_))
        ));
        assert!(decode_token(&HttpResponse::new(200, r#"{"access_token":"a"}"#)).is_ok());
    }
}
