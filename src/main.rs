// tradekit - utility dashboard for traders
//
// Widgets: one-time codes, hashing and Base64 (computed by a remote HTTP
// service), QR codes and barcodes (rendered locally), a word counter and
// broker link directories.
//
// Architecture:
// - remote: typed client for the computation service
// - controller: per-action state machine (loading/result/error/copy feedback)
// - render: QR and barcode encoders with terminal preview and SVG export
// - tools: word counter, scripmaster directory, resource library
// - TUI (ratatui): widget tabs; outcomes arrive on an mpsc channel
// - CLI (clap): every widget reachable headless

mod cli;
mod clipboard;
mod config;
mod controller;
mod logging;
mod remote;
mod render;
mod theme;
mod tools;
mod tui;

use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing
///
/// In TUI mode logs are captured to the buffer (so they never garble the
/// display); in CLI mode they go to stderr. File logging is added on top of
/// either when enabled. The returned guard must live until exit so the
/// non-blocking writer flushes.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("tradekit={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_mode.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!tui_mode).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // JSON for structured log parsing
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn print_config_error(err: &anyhow::Error) {
    eprintln!("Error: configuration could not be loaded");
    eprintln!();
    for cause in err.chain() {
        eprintln!("  {}", cause);
    }
    eprintln!();
    eprintln!("Fix the file, or regenerate it with `tradekit config --reset`.");
}

fn report(result: anyhow::Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // config --path / --reset must work with a broken config file
    if let Some(command) = cli.command.as_ref().filter(|c| c.skips_config()) {
        return report(cli::run_without_config(command));
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            print_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let tui_mode = cli.command.is_none();
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, tui_mode, &log_buffer);

    match cli.command {
        Some(command) => report(cli::run(command, config).await),
        None => {
            // Helps users discover options
            Config::ensure_config_exists();
            tracing::info!("Starting dashboard");
            let result = tui::run_tui(log_buffer, config).await;
            tracing::info!("Shutdown complete");
            report(result.map(|()| ExitCode::SUCCESS))
        }
    }
}
