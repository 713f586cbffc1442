//! Write a default configuration file

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::config::{LayoutCheckConfig, DEFAULT_CONFIG_FILE};
use crate::output::print_success;

#[derive(Args)]
pub struct InitArgs {
    /// Where to write the file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: &InitArgs) -> Result<bool> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.path.display());
    }

    LayoutCheckConfig::default().save(&args.path)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(true)
}
