//! Progress events emitted while a login runs.

use std::time::Duration;

/// Events emitted during the login flow for UI updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    /// The authorization URL to visit.
    AuthorizationUrl {
        /// The URL, usable manually if no browser opens.
        url: String,
    },
    /// The system browser was launched.
    BrowserOpened,
    /// The system browser could not be launched.
    BrowserFailed {
        /// OS error message.
        message: String,
    },
    /// The listener is waiting for the redirect.
    WaitingForCallback {
        /// Bound port.
        port: u16,
        /// Wait window.
        timeout: Duration,
    },
    /// A valid redirect was received.
    CallbackReceived,
    /// The code is being exchanged for tokens.
    ExchangingCode,
    /// Tokens were obtained and saved.
    Completed {
        /// The space logged into.
        space: String,
        /// Preview of the new access token.
        token_preview: String,
    },
}

/// Receives login progress events.
pub trait LoginObserver: Send + Sync {
    /// Called once per event, in order.
    fn on_event(&self, event: &LoginEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LoginObserver for NoopObserver {
    fn on_event(&self, _event: &LoginEvent) {}
}

/// Get a preview of an access token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("abcdefghijklmnop"), "abcdefgh...");
        assert_eq!(token_preview("short"), "short");
    }
}
