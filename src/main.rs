use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use oddeven::config::{self, Config};
use oddeven::emitter::StdoutEmitter;
use oddeven::orchestrator::{self, RunReport};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    // Standard output is reserved for the emitted lines, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oddeven")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("oddeven.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let emitter = Arc::new(StdoutEmitter::new());
    let report = runtime
        .block_on(orchestrator::run(config.run_settings(), emitter))
        .context("Run failed")?;

    if cli.is_verbose() {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    eprintln!(
        "{} {} mode, limit {}",
        "Finished:".green(),
        report.settings.mode,
        report.settings.limit
    );
    eprintln!(
        "  {} {:?} ({} iterations)",
        "Odd:".cyan(),
        report.odd.emitted,
        report.odd.iterations
    );
    eprintln!(
        "  {} {:?} ({} iterations)",
        "Even:".cyan(),
        report.even.emitted,
        report.even.iterations
    );
    eprintln!(
        "  {} {} sent, {} received",
        "Handoff:".yellow(),
        report.handoff.sent,
        report.handoff.received
    );
}

fn main() -> Result<()> {
    // Logs are a side channel; without a writable data dir they go to stderr instead
    if let Err(e) = setup_logging() {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Stderr)
            .init();
        log::warn!("Logging to stderr, log file unavailable: {:#}", e);
    }

    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_overrides(cli.limit, cli.mode);
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
