//! # bootlog-cli
//!
//! Command-line interface for bootlog.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bootlog_core::Config;
use bootlog_session::Controller;

mod serial;

use serial::SerialSource;

/// bootlog - serial boot-session logger
///
/// Monitors a device's serial output and writes one timestamped
/// logfile per boot/reboot cycle.
#[derive(Parser)]
#[command(name = "bootlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial device to monitor (e.g. /dev/ttyUSB0)
    #[arg(value_name = "DEVICE")]
    device: String,

    /// Directory session logfiles are written to
    #[arg(short, long, value_name = "DIR", default_value = "/tmp/logs")]
    output_dir: PathBuf,

    /// Seconds to wait for serial data before monitoring stops
    #[arg(long, value_name = "SECS", default_value_t = 1800)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = Config::with_output_dir(cli.output_dir);
    config.timeout_secs = cli.timeout_secs;

    let mut source = SerialSource::open(&cli.device, Duration::from_secs(config.timeout_secs))?;
    let mut controller = Controller::new(config)?;

    controller.run(&mut source)?;

    // The port is released when the source drops.
    tracing::info!("source exhausted, monitoring finished");
    Ok(())
}
