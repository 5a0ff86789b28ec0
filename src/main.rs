//! vctag CLI
//!
//! Command-line interface for writing Vorbis comments.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vctag::abort;
use vctag::cli::{commands, Cli, Commands};
use vctag::{TagWriter, WriterConfig};

/// Exit status after an interrupt (128 + SIGINT)
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger; also forwards `log` records from the command layer
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    install_shutdown_handler()?;

    let config = WriterConfig::from_env();
    tracing::debug!(?config, "writer configuration");
    let writer = TagWriter::from_config(&config);

    let success = match cli.command {
        Commands::Write { file, tags, json } => commands::write(&writer, &file, &tags, json)?,
        Commands::Delete { file, json } => commands::delete(&writer, &file, json)?,
        Commands::Sanitize { name } => commands::sanitize(&name)?,
        Commands::Render { tags } => commands::render(&tags)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Listen for Ctrl+C / SIGTERM on a background thread.
///
/// Installing the handler replaces the default "terminate now" disposition,
/// so on a signal the thread waits out any abort-suppressed tag write and
/// then exits the process itself. Returns once the signals are registered.
fn install_shutdown_handler() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build signal runtime")?;
    let (ready_tx, ready_rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("vctag-signals".to_string())
        .spawn(move || {
            if let Err(e) = runtime.block_on(shutdown_signal(ready_tx)) {
                tracing::warn!(error = %e, "signal handler unavailable");
                return;
            }
            abort::wait_for_release(Duration::from_millis(50));
            std::process::exit(INTERRUPTED_EXIT_CODE);
        })
        .context("failed to spawn signal thread")?;

    // A dropped sender means registration failed; the signal thread logs why
    let _ = ready_rx.recv();
    Ok(())
}

async fn shutdown_signal(ready: mpsc::Sender<()>) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut interrupt = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        let _ = ready.send(());

        tokio::select! {
            _ = interrupt.recv() => info!("Received Ctrl+C, shutting down"),
            _ = terminate.recv() => info!("Received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ready.send(());
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down");
    }

    Ok(())
}
