//! `bgl auth` commands.

use std::io::Write;
use std::sync::Mutex;

use bgl_application::{LoginEvent, LoginObserver, TokenStatus};
use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::error::CliResult;
use crate::{prompt, ui};

/// Logs in through the browser, prompting for the space if needed.
///
/// # Errors
///
/// Returns the login failure; nothing is saved in that case.
pub async fn login(
    ctx: &AppContext,
    space: Option<String>,
    cancel: &CancellationToken,
    out: &mut dyn Write,
) -> CliResult {
    let space = match space {
        Some(space) => space,
        None => prompt::space()?,
    };

    let credential = {
        let observer = TerminalObserver::default();
        ctx.oauth_flow().login(&space, cancel, &observer).await?
    };

    writeln!(out, "Login successful! Tokens saved to config.")?;
    crate::detail!("Space: {}", credential.space);
    Ok(())
}

/// Clears the stored tokens.
///
/// # Errors
///
/// Returns `NotAuthenticated` if nothing is stored.
pub async fn logout(ctx: &AppContext, out: &mut dyn Write) -> CliResult {
    ctx.session().logout().await?;
    writeln!(out, "Logged out successfully.")?;
    Ok(())
}

/// Refreshes the stored access token.
///
/// # Errors
///
/// Returns the refresh failure; the stored credential is unchanged then.
pub async fn refresh(ctx: &AppContext, out: &mut dyn Write) -> CliResult {
    let spinner = ui::spinner("Refreshing access token...");
    let result = ctx.refresher().refresh().await;
    spinner.finish_and_clear();
    result?;

    writeln!(out, "Token refreshed successfully.")?;
    Ok(())
}

/// Prints the stored space and token state.
///
/// # Errors
///
/// Returns an error if the credential cannot be read.
pub async fn status(ctx: &AppContext, out: &mut dyn Write) -> CliResult {
    let status = ctx.session().status().await?;

    let space = if status.space.is_empty() {
        "(none)"
    } else {
        status.space.as_str()
    };
    writeln!(out, "Space: {space}")?;
    writeln!(out, "Token: {}", status.token.display_message())?;
    if status.token == TokenStatus::NotAuthenticated {
        writeln!(out, "Run 'bgl auth login' to log in.")?;
    }
    Ok(())
}

/// Prints login progress and keeps a spinner up while waiting.
#[derive(Default)]
struct TerminalObserver {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalObserver {
    fn set_spinner(&self, next: Option<ProgressBar>) {
        let mut guard = self
            .spinner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = guard.take() {
            previous.finish_and_clear();
        }
        *guard = next;
    }
}

impl LoginObserver for TerminalObserver {
    fn on_event(&self, event: &LoginEvent) {
        match event {
            LoginEvent::AuthorizationUrl { url } => {
                eprintln!();
                crate::info!("Opening browser for authentication...");
                eprintln!("If browser doesn't open automatically, please visit:\n{url}\n");
            }
            LoginEvent::BrowserOpened => {}
            LoginEvent::BrowserFailed { message } => {
                crate::warning!("Failed to open browser: {message}");
            }
            LoginEvent::WaitingForCallback { port, timeout } => {
                tracing::debug!(port, "Waiting for redirect");
                self.set_spinner(Some(ui::spinner(format!(
                    "Waiting for authentication (up to {} minutes, Ctrl-C to cancel)...",
                    timeout.as_secs() / 60
                ))));
            }
            LoginEvent::CallbackReceived => self.set_spinner(None),
            LoginEvent::ExchangingCode => {
                self.set_spinner(Some(ui::spinner("Exchanging authorization code...")));
            }
            LoginEvent::Completed { token_preview, .. } => {
                self.set_spinner(None);
                crate::success!("Access token: {token_preview}");
            }
        }
    }
}

impl Drop for TerminalObserver {
    fn drop(&mut self) {
        self.set_spinner(None);
    }
}
