//! Show what a snapshot captured

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use layoutcheck_core::Snapshot;
use tracing::debug;

use crate::output::{print_snapshot, OutputFormat};

#[derive(Args)]
pub struct InspectArgs {
    /// Snapshot JSON file
    pub snapshot: PathBuf,
}

pub fn execute(args: &InspectArgs, format: OutputFormat) -> Result<bool> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let lint = snapshot.lint();
    debug!("{} element(s), {} lint finding(s)", snapshot.elements.len(), lint.len());

    print_snapshot(&snapshot, &lint, format);
    Ok(true)
}
