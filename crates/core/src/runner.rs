//! Test runner that maps snapshot files to test cases and aggregates results

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::case::{CaseReport, LayoutCheck, TestCase};
use crate::convention::{StyleConvention, TailwindConvention};
use crate::error::{LayoutError, LayoutResult};
use crate::scenario::Scenario;

/// Result of running a set of cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub duration_ms: u64,
    pub results: Vec<CaseReport>,
}

impl SuiteResult {
    fn from_reports(started_at: DateTime<Utc>, start: Instant, results: Vec<CaseReport>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            started_at,
            total: results.len(),
            passed,
            failed: results.len() - passed,
            warnings: results.iter().map(|r| r.warnings.len()).sum(),
            duration_ms: start.elapsed().as_millis() as u64,
            results,
        }
    }

    /// Logical AND of every case; warnings never count
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn summary_line(&self) -> String {
        if self.total == 0 {
            "✗ No test cases were run".to_string()
        } else if self.all_passed() {
            format!("✓ All {} layout test case(s) passed", self.total)
        } else {
            format!(
                "✗ {} of {} layout test case(s) failed",
                self.failed, self.total
            )
        }
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory holding captured snapshot files
    pub snapshot_dir: PathBuf,

    /// Directory searched for scenario YAML files
    pub scenario_dir: PathBuf,

    /// Output directory for results
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("results"),
            scenario_dir: PathBuf::from("scenarios"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Runs test cases in isolation from one another
pub struct TestRunner {
    config: RunnerConfig,
    convention: Box<dyn StyleConvention>,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a test runner with the default style convention
    pub fn with_config(config: RunnerConfig) -> Self {
        Self::with_convention(config, Box::new(TailwindConvention::default()))
    }

    pub fn with_convention(config: RunnerConfig, convention: Box<dyn StyleConvention>) -> Self {
        Self { config, convention }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn snapshot_path(&self, file: &Path) -> PathBuf {
        self.config.snapshot_dir.join(file)
    }

    /// Run one check against one snapshot file.
    ///
    /// Load failures and panics inside the check become a failed report for
    /// this case only.
    pub fn run_case(&self, snapshot: &Path, check: &dyn LayoutCheck) -> CaseReport {
        let path = self.snapshot_path(snapshot);
        let name = check.name().to_string();

        let case = match TestCase::load(name.clone(), &path) {
            Ok(case) => case,
            Err(e) => {
                error!("✗ {} - {}", name, e);
                return CaseReport::failed(name, Some(&path), &e);
            }
        };

        let convention = self.convention.as_ref();
        match panic::catch_unwind(AssertUnwindSafe(|| case.run(check, convention))) {
            Ok(report) => {
                if report.passed {
                    info!("✓ {} ({} ms)", report.name, report.duration_ms);
                } else {
                    warn!("✗ {} - {} error(s)", report.name, report.errors.len());
                }
                report
            }
            Err(payload) => {
                let e = LayoutError::Panicked(panic_message(payload.as_ref()));
                error!("✗ {} - {}", name, e);
                CaseReport::failed(name, Some(&path), &e)
            }
        }
    }

    /// Run (snapshot file, check) pairs in order
    pub fn run_cases(&self, cases: &[(PathBuf, &dyn LayoutCheck)]) -> SuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();

        info!("Running {} layout test case(s)...", cases.len());
        let results = cases
            .iter()
            .map(|(snapshot, check)| self.run_case(snapshot, *check))
            .collect();

        let result = SuiteResult::from_reports(started_at, start, results);
        info!(
            "Layout results: {} passed, {} failed, {} warning(s) ({} ms)",
            result.passed, result.failed, result.warnings, result.duration_ms
        );
        result
    }

    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> SuiteResult {
        let cases: Vec<(PathBuf, &dyn LayoutCheck)> = scenarios
            .iter()
            .map(|s| (s.snapshot.clone(), s as &dyn LayoutCheck))
            .collect();
        self.run_cases(&cases)
    }

    /// Run every scenario in the scenario directory.
    ///
    /// Scenario files that fail to parse are reported as failed cases.
    pub fn run_all(&self) -> SuiteResult {
        self.run_matching(|_| true).0
    }

    /// Run scenarios carrying `tag`, plus a failed case per unparseable file
    pub fn run_tagged(&self, tag: &str) -> SuiteResult {
        self.run_matching(|s| s.has_tag(tag)).0
    }

    /// Run a specific scenario by name.
    ///
    /// Unparseable files are reported alongside it, since any of them may be
    /// the scenario asked for.
    pub fn run_named(&self, name: &str) -> LayoutResult<SuiteResult> {
        let (result, matched) = self.run_matching(|s| s.name == name);
        if matched == 0 && result.total == 0 {
            return Err(LayoutError::CaseNotFound(name.to_string()));
        }
        Ok(result)
    }

    /// Runs parsed scenarios accepted by `filter` in path order. Returns the
    /// suite and the number of scenarios the filter accepted.
    fn run_matching<F>(&self, filter: F) -> (SuiteResult, usize)
    where
        F: Fn(&Scenario) -> bool,
    {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut matched = 0;
        let mut results = Vec::new();
        for (path, parsed) in Scenario::discover(&self.config.scenario_dir) {
            match parsed {
                Ok(scenario) if filter(&scenario) => {
                    matched += 1;
                    results.push(self.run_case(&scenario.snapshot, &scenario));
                }
                Ok(scenario) => debug!("Skipping {} ({})", scenario.name, path.display()),
                Err(e) => {
                    error!("✗ {} - {}", path.display(), e);
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());
                    results.push(CaseReport::failed(name, None, &e));
                }
            }
        }

        let result = SuiteResult::from_reports(started_at, start, results);
        info!(
            "Layout results: {} passed, {} failed, {} warning(s) ({} ms)",
            result.passed, result.failed, result.warnings, result.duration_ms
        );
        (result, matched)
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &SuiteResult) -> LayoutResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("layout-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        debug!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_config_default() {
        let config = RunnerConfig::default();
        assert_eq!(config.snapshot_dir, PathBuf::from("results"));
        assert_eq!(config.output_dir, PathBuf::from("test-results"));
    }

    #[test]
    fn test_empty_suite_summary() {
        let result = SuiteResult::from_reports(Utc::now(), Instant::now(), Vec::new());
        assert!(result.all_passed());
        assert_eq!(result.summary_line(), "✗ No test cases were run");
    }
}
