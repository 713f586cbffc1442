//! Run a single scenario file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use layoutcheck_core::{Scenario, TestRunner};

use crate::output::{print_case, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Scenario YAML file
    pub scenario: PathBuf,

    /// Snapshot file to check instead of the one named by the scenario
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

pub fn execute(args: &CheckArgs, runner: &TestRunner, format: OutputFormat) -> Result<bool> {
    let scenario = Scenario::from_file(&args.scenario)?;

    // An explicit --snapshot is resolved against the working directory
    let snapshot = match &args.snapshot {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => std::env::current_dir()
            .context("Failed to resolve working directory")?
            .join(path),
        None => scenario.snapshot.clone(),
    };

    let report = runner.run_case(&snapshot, &scenario);
    print_case(&report, format);
    Ok(report.passed)
}
