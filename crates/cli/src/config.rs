//! CLI configuration (`layoutcheck.toml`)

use std::path::{Path, PathBuf};

use layoutcheck_core::{LayoutError, LayoutResult, RunnerConfig, TailwindConvention};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "layoutcheck.toml";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCheckConfig {
    /// Directory holding captured snapshot files
    pub snapshot_dir: PathBuf,

    /// Directory searched for scenario files
    pub scenario_dir: PathBuf,

    /// Where `layout-results.json` is written
    pub output_dir: PathBuf,

    /// Class-name convention used by the state checks
    pub convention: TailwindConvention,
}

impl Default for LayoutCheckConfig {
    fn default() -> Self {
        let runner = RunnerConfig::default();
        Self {
            snapshot_dir: runner.snapshot_dir,
            scenario_dir: runner.scenario_dir,
            output_dir: runner.output_dir,
            convention: TailwindConvention::default(),
        }
    }
}

impl LayoutCheckConfig {
    /// Load configuration from file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> LayoutResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| LayoutError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> LayoutResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| LayoutError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            snapshot_dir: self.snapshot_dir.clone(),
            scenario_dir: self.scenario_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
