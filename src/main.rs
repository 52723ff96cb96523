//! `gear-cockpit`: interactive landing gear simulator.

use anyhow::{bail, Context};
use clap::Parser;
use landing_gear::cockpit::{self, DEFAULT_STEP_S};
use landing_gear::config::{read_config_value, Config, DEFAULT_CONFIG_PATH};
use landing_gear::controller::{GearController, TracingSink};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

/// Landing gear cockpit.
///
/// Type `d` to command the gear down, `u` for up, `q` to quit. Every line
/// advances simulated time by one step.
#[derive(Parser, Debug)]
#[command(name = "gear-cockpit", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// File that gear diagnostics are appended to.
    #[arg(long, default_value = "landing_gear.log")]
    log_file: PathBuf,

    /// Simulated seconds per input line.
    #[arg(long, default_value_t = DEFAULT_STEP_S)]
    step: f64,

    /// Refuse to start if any configuration field is malformed.
    #[arg(long)]
    strict: bool,
}

fn load(cli: &Cli) -> anyhow::Result<Config> {
    let raw = read_config_value(&cli.config)?;

    if cli.strict {
        if let Validation::Failure(issues) = Config::check(&raw) {
            let report = issues
                .iter()
                .map(|issue| format!("  - {issue}"))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{} has malformed fields:\n{report}", cli.config.display());
        }
    }

    tracing::info!("Loading configuration from {}", cli.config.display());
    Ok(Config::from_value(&raw))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !(cli.step.is_finite() && cli.step >= 0.0) {
        bail!("--step must be a non-negative number of seconds, got {}", cli.step);
    }

    // Configuration messages go to the terminal; gear events go to the log file.
    let startup = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let config = tracing::subscriber::with_default(startup, || load(&cli))?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("failed to open log file {}", cli.log_file.display()))?;
    let level = config.logging.tracing_level().as_str().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut controller = GearController::from_config(&config, TracingSink)
        .context("invalid gear configuration")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cockpit::run(&mut controller, stdin.lock(), stdout.lock(), cli.step)?;

    Ok(())
}
