//! layoutcheck CLI - Main Entry Point
//!
//! Runs layout scenarios against captured page snapshots and reports
//! per-case results with an exit status for CI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use layoutcheck_core::TestRunner;

mod commands;
mod config;
mod output;

use commands::{check, init, inspect, run};
use config::{LayoutCheckConfig, DEFAULT_CONFIG_FILE};

/// Structural visual regression checks over layout snapshots
#[derive(Parser)]
#[command(name = "layoutcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "LAYOUTCHECK_CONFIG", default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Override the snapshot directory
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Override the scenario directory
    #[arg(long, global = true)]
    scenario_dir: Option<PathBuf>,

    /// Override the results directory
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every scenario (or a tagged / named subset)
    Run(run::RunArgs),

    /// Run one scenario file
    Check(check::CheckArgs),

    /// List the elements captured in a snapshot
    Inspect(inspect::InspectArgs),

    /// Write a default layoutcheck.toml
    InitConfig(init::InitArgs),
}

/// Exit status when a usage or configuration problem prevents running
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = execute(cli);
    if let Err(e) = &outcome {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 when every case passed, 1 when any failed, 2 when nothing could run
fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => EXIT_USAGE,
    }
}

fn execute(cli: Cli) -> anyhow::Result<bool> {
    let format = cli.format;
    match cli.command {
        Commands::Run(ref args) => run::execute(args, &build_runner(&cli)?, format),
        Commands::Check(ref args) => check::execute(args, &build_runner(&cli)?, format),
        Commands::Inspect(ref args) => inspect::execute(args, format),
        Commands::InitConfig(ref args) => init::execute(args),
    }
}

/// Config file values with command-line overrides applied
fn build_runner(cli: &Cli) -> anyhow::Result<TestRunner> {
    let mut config = LayoutCheckConfig::load(&cli.config)?;
    if let Some(dir) = &cli.snapshot_dir {
        config.snapshot_dir = dir.clone();
    }
    if let Some(dir) = &cli.scenario_dir {
        config.scenario_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    tracing::debug!("Configuration: {:?}", config);

    Ok(TestRunner::with_convention(config.runner_config(), Box::new(config.convention)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutcheck_core::LayoutError;
    use tempfile::TempDir;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(true)), 0);
        assert_eq!(exit_status(&Ok(false)), 1);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "output_dir = [").unwrap();
        let outcome = LayoutCheckConfig::load(&path).map(|_| true).map_err(anyhow::Error::from);
        assert!(matches!(
            outcome.as_ref().unwrap_err().downcast_ref::<LayoutError>(),
            Some(LayoutError::Config(_))
        ));
        assert_eq!(exit_status(&outcome), 2);
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from(["layoutcheck", "--format", "json", "run", "--tag", "auth"]).unwrap();
        assert_eq!(cli.format, output::OutputFormat::Json);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.tag.as_deref(), Some("auth")),
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from(["layoutcheck", "run", "--tag", "a", "--name", "b"]).is_err());
    }
}
