//! Loopback redirect parameters and the outcomes of waiting for them.

use thiserror::Error;

/// Query parameters accepted on the redirect: `state` and `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Echoed `state` nonce.
    pub state: Option<String>,
    /// Authorization code.
    pub code: Option<String>,
}

impl CallbackParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Unknown parameters are ignored; the first occurrence of a repeated
    /// parameter wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "state" if params.state.is_none() => params.state = Some(value.into_owned()),
                "code" if params.code.is_none() => params.code = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }
}

/// Why waiting for the redirect did not produce a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackFailure {
    /// The redirect carried a different `state` than the one generated.
    #[error("state mismatch (received {received:?})")]
    StateMismatch {
        /// The `state` value received, empty if absent.
        received: String,
    },
    /// The redirect carried no `code`.
    #[error("no authorization code received")]
    MissingCode,
    /// Nothing arrived within the wait window.
    #[error("authentication timeout")]
    TimedOut,
    /// The listener stopped before delivering a result.
    #[error("callback listener failed: {0}")]
    Listener(String),
}

/// Terminal state of one wait for the redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// A matching redirect delivered this code.
    Succeeded {
        /// The authorization code.
        code: String,
    },
    /// The wait ended without a usable code.
    Failed(CallbackFailure),
    /// The user cancelled the wait.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_query() {
        let params = CallbackParams::from_query("code=abc%2F1&state=s1&extra=x");
        assert_eq!(
            params,
            CallbackParams {
                state: Some("s1".to_string()),
                code: Some("abc/1".to_string()),
            }
        );
    }

    #[test]
    fn test_from_empty_query() {
        assert_eq!(CallbackParams::from_query(""), CallbackParams::default());
    }

    #[test]
    fn test_first_value_wins() {
        let params = CallbackParams::from_query("state=a&state=b");
        assert_eq!(params.state.as_deref(), Some("a"));
    }
}
