//! Binary entry point for `timeat-bot`.
//!
//! This module provides the command-line interface for timeat-bot with options
//! for configuration file paths and logging verbosity. It initializes the
//! necessary components and starts the service.

use clap::Parser;
use timeat_bot::base::{config::Config, types::Void};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Timeat-bot – a Telegram timezone lookup bot.
///
/// Configuration can come from `config.toml` or environment variables.
/// The bot answers `/timeat` and `/timepopularity` commands delivered to
/// its webhook, and keeps per-timezone usage counters.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the timeat-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    tracing_subscriber::registry().with(level_filter).with(stdout).init();

    let config = Config::load(args.config.as_deref())?;

    timeat_bot::start(config).await
}
