//! Session Guard CLI - drives the session guard from a terminal.
//!
//! Logs in against the book service, keeps the access token in a local
//! store, and sends authenticated requests with it.

mod cli;
mod commands;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use session_guard_core::{FileTokenStore, GuardConfig, KeyringTokenStore, TokenStore};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Args, Command, StoreKind};

/// Log file name prefix; the appender adds the date
const LOG_FILE_PREFIX: &str = "session-guard.log";

/// Initialize the tracing subscriber for logging.
///
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug). With
/// `log_file`, a daily-rolling file in the cache directory receives the same
/// events; the returned guard must live until exit so it gets flushed.
fn init_tracing(log_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = if log_file {
        let dir = GuardConfig::cache_dir()?.join("logs");
        std::fs::create_dir_all(&dir).context("Failed to create log directory")?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

fn open_store(kind: StoreKind) -> Result<Arc<dyn TokenStore>> {
    Ok(match kind {
        StoreKind::File => Arc::new(FileTokenStore::new(GuardConfig::cache_dir()?)),
        StoreKind::Keyring => Arc::new(KeyringTokenStore::default()),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _log_guard = init_tracing(args.log_file)?;

    let config = GuardConfig::load()
        .context("Failed to load configuration")?
        .with_env_overrides();
    info!(base_url = %config.base_url, "Session guard starting");

    let store = open_store(args.store)?;

    match args.command {
        Command::Status => commands::status(store, config)?,
        Command::Login { username } => commands::login(store, config, &username).await?,
        Command::Logout => commands::logout(store, config),
        Command::Get { urls } => commands::get(store, config, &urls).await?,
        Command::Visit { path } => commands::visit(store, config, &path),
        Command::CheckAccount { email } => commands::check_account(&email)?,
    }

    Ok(())
}
