//! battery-level
//!
//! Prints the current battery percentage once and exits. `-1` means the
//! host reported no usable reading.

use anyhow::{Context, Result};
use battlevel_config::BattlevelConfig;
use battlevel_hal::{SourceSettings, SysfsPowerSource, battery_level};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Exit status when the reading could not be attempted
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "battery-level",
    version,
    about = "Print the current battery percentage (-1 when unknown)"
)]
struct Cli {
    /// Print {"battery": N} instead of the bare value
    #[arg(long)]
    json: bool,

    /// Read configuration from PATH instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read this power-supply directory directly, e.g. /sys/class/power_supply/BAT0
    #[arg(long, value_name = "DIR", conflicts_with = "config")]
    supply: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Usage errors exit 2, --help and --version exit 0
    let cli = Cli::parse();

    setup_logging();

    let outcome = run(&cli);
    match &outcome {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("error: {:#}", e),
    }
    ExitCode::from(exit_status(&outcome))
}

/// Setup logging to stderr so stdout carries only the reading
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// A `-1` reading is still a success
fn exit_status(outcome: &Result<String>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => EXIT_FAILURE,
    }
}

fn load_config(cli: &Cli) -> Result<BattlevelConfig> {
    match &cli.config {
        Some(path) => BattlevelConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => BattlevelConfig::load_default().context("Failed to load default config"),
    }
}

fn resolve_source(cli: &Cli) -> Result<SysfsPowerSource> {
    if let Some(dir) = &cli.supply {
        return Ok(SysfsPowerSource::with_path(dir));
    }

    let config = load_config(cli)?;
    Ok(SysfsPowerSource::from_settings(&SourceSettings::from(
        &config.source,
    )))
}

fn run(cli: &Cli) -> Result<String> {
    let source = resolve_source(cli)?;
    debug!("Reading battery from {}", source.battery_path().display());

    Ok(render(battery_level(&source), cli.json))
}

fn render(level: i32, json: bool) -> String {
    if json {
        serde_json::json!({ "battery": level }).to_string()
    } else {
        level.to_string()
    }
}
