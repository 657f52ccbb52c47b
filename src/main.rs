//! SpareBin order robot CLI
//!
//! Submits every order from the published CSV feed through the
//! RobotSpareBin order form and archives the captured receipts.

use clap::Parser;
use sparebin_orderbot::browser::BrowserConfig;
use sparebin_orderbot::config::{DEFAULT_MAX_SUBMIT_RETRIES, DEFAULT_OUTPUT_DIR};
use sparebin_orderbot::{Robot, RobotConfig};
use std::path::PathBuf;

/// SpareBin order robot
#[derive(Parser, Debug)]
#[command(name = "orderbot")]
#[command(version)]
#[command(about = "Submits RobotSpareBin orders from the published CSV feed")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show the browser window (headless is the default)
    #[arg(long)]
    headed: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Root directory for receipts, screenshots, and the archive
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// How many times a rejected submission is re-tried
    #[arg(long, default_value_t = DEFAULT_MAX_SUBMIT_RETRIES)]
    max_submit_retries: u32,

    /// Keep processing remaining orders when one fails
    #[arg(long)]
    continue_on_error: bool,

    /// Disable the Chrome sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut browser = BrowserConfig::builder()
        .headless(!args.headed)
        .sandbox(!args.no_sandbox);
    if let Some(path) = args.chrome_path {
        browser = browser.chrome_path(path);
    }

    let config = RobotConfig {
        output_dir: args.output_dir,
        max_submit_retries: args.max_submit_retries,
        continue_on_error: args.continue_on_error,
        browser: browser.build(),
        ..Default::default()
    };

    tracing::info!(
        "{} {} starting",
        sparebin_orderbot::NAME,
        sparebin_orderbot::VERSION
    );

    let summary = Robot::initialize(config).await?.run().await?;

    for failure in &summary.failed {
        tracing::warn!(
            "Order {} not submitted: {}",
            failure.order_number,
            failure.reason
        );
    }
    if let Some(archive) = &summary.archive {
        tracing::info!("Receipts archive: {}", archive.display());
    }
    tracing::info!(
        "Done: {}/{} orders submitted in {}ms",
        summary.submitted,
        summary.total,
        summary.duration_ms
    );

    Ok(())
}
