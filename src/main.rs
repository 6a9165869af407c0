// pii-scan - SSN detection for OCR'd PDFs with AWS Comprehend
// Copyright (c) 2026 pii-scan Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_scan::cli::{Cli, Commands};
use pii_scan::config::{load_config, LoggingConfig, PiiScanConfig};
use pii_scan::domain::Result;
use pii_scan::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // `init` writes a config file, so it must not require one
    let config = match cli.command {
        Commands::Init(_) => None,
        _ => Some(load_config(&cli.config)),
    };

    let loaded = config.as_ref().and_then(|c| c.as_ref().ok());
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = loaded
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "pii-scan - SSN detection for OCR'd PDFs"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_shutdown().await;
        println!("\n⚠️  Shutdown signal received, finishing the current file...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = match execute_command(&cli, config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush the log writer first
    drop(logging_guard);
    process::exit(exit_code);
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            wait_for_ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown..."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: Option<Result<PiiScanConfig>>,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match (&cli.command, config) {
        (Commands::Init(args), _) => args.execute().await,
        (Commands::Scan(args), Some(config)) => args.execute(config, shutdown_signal).await,
        (Commands::ValidateConfig(args), Some(config)) => {
            args.execute(&cli.config, config).await
        }
        (_, None) => anyhow::bail!("configuration was not loaded"),
    }
}
