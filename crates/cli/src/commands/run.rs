//! Run scenarios from the scenario directory

use anyhow::Result;
use clap::Args;
use layoutcheck_core::{SuiteResult, TestRunner};
use tracing::info;

use crate::output::{print_suite, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    /// Only run scenarios carrying this tag
    #[arg(long, conflicts_with = "name")]
    pub tag: Option<String>,

    /// Only run the scenario with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Skip writing layout-results.json
    #[arg(long)]
    pub no_write: bool,
}

/// Returns whether every case passed. An empty run counts as a failure.
pub fn execute(args: &RunArgs, runner: &TestRunner, format: OutputFormat) -> Result<bool> {
    info!(
        "Scenarios: {}, snapshots: {}",
        runner.config().scenario_dir.display(),
        runner.config().snapshot_dir.display()
    );

    let result = match (&args.tag, &args.name) {
        (_, Some(name)) => runner.run_named(name)?,
        (Some(tag), None) => runner.run_tagged(tag),
        (None, None) => runner.run_all(),
    };

    print_suite(&result, format);

    if !args.no_write {
        let path = runner.write_results(&result)?;
        if format != OutputFormat::Json {
            println!("Results written to {}", path.display());
        }
    }

    Ok(suite_passed(&result))
}

/// An empty run counts as a failure
pub fn suite_passed(result: &SuiteResult) -> bool {
    result.total > 0 && result.all_passed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutcheck_core::RunnerConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADING: &str = r#"{ "viewport": { "width": 1280, "height": 720 }, "elements": [
        { "tag": "h1", "text": "Auto", "rect": { "x": 560, "y": 120, "width": 160, "height": 40 } }
    ] }"#;

    fn runner(dir: &Path) -> TestRunner {
        TestRunner::with_config(RunnerConfig {
            snapshot_dir: dir.join("results"),
            scenario_dir: dir.join("scenarios"),
            output_dir: dir.join("out"),
        })
    }

    fn workspace(scenarios: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("results")).unwrap();
        fs::create_dir_all(dir.path().join("scenarios")).unwrap();
        fs::write(dir.path().join("results/page.json"), HEADING).unwrap();
        for (file, yaml) in scenarios {
            fs::write(dir.path().join("scenarios").join(file), yaml).unwrap();
        }
        dir
    }

    fn run(dir: &TempDir) -> bool {
        let args = RunArgs {
            tag: None,
            name: None,
            no_write: true,
        };
        execute(&args, &runner(dir.path()), OutputFormat::Plain).unwrap()
    }

    const PASSING: &str = "name: heading\nsnapshot: page.json\nchecks:\n  - check: exists\n    element: { tag: h1 }\n";
    const FAILING: &str = "name: footer\nsnapshot: page.json\nchecks:\n  - check: exists\n    element: { tag: footer }\n";

    #[test]
    fn test_all_passing_run_succeeds() {
        assert!(run(&workspace(&[("heading.yaml", PASSING)])));
    }

    #[test]
    fn test_any_failing_case_fails_the_run() {
        assert!(!run(&workspace(&[("heading.yaml", PASSING), ("footer.yaml", FAILING)])));
    }

    #[test]
    fn test_empty_run_fails() {
        assert!(!run(&workspace(&[])));
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let dir = workspace(&[("heading.yaml", PASSING)]);
        let args = RunArgs {
            tag: None,
            name: Some("missing".to_string()),
            no_write: true,
        };
        assert!(execute(&args, &runner(dir.path()), OutputFormat::Plain).is_err());
    }

    #[test]
    fn test_results_file_is_written() {
        let dir = workspace(&[("heading.yaml", PASSING)]);
        let args = RunArgs {
            tag: None,
            name: None,
            no_write: false,
        };
        assert!(execute(&args, &runner(dir.path()), OutputFormat::Json).unwrap());
        assert!(dir.path().join("out/layout-results.json").exists());
    }
}
