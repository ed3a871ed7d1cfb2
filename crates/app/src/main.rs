//! bgl binary entry point.

use std::process::ExitCode;
use std::time::Duration;

use bgl::{AppContext, Cli, CliError, commands, ui};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const INTERRUPT_GRACE: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            ui::print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupt received");
            on_interrupt.cancel();
        }
    });

    let mut stdout = std::io::stdout().lock();
    let result = tokio::select! {
        biased;
        result = commands::run(cli.command, &ctx, &cancel, &mut stdout) => result,
        () = interrupted(&cancel) => Err(CliError::Interrupted),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Resolves shortly after Ctrl-C, giving commands that watch the token
/// time to release the callback port first.
async fn interrupted(cancel: &CancellationToken) {
    cancel.cancelled().await;
    tokio::time::sleep(INTERRUPT_GRACE).await;
}

/// Logs to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "bgl=debug,bgl_application=debug,bgl_infrastructure=debug"
    } else {
        "bgl=warn,bgl_application=warn,bgl_infrastructure=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
