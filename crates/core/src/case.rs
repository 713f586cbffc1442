//! Test cases and their reports

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assertions::Assertions;
use crate::convention::StyleConvention;
use crate::error::{LayoutError, LayoutResult};
use crate::snapshot::Snapshot;

/// A fixed sequence of checks for one captured page state
pub trait LayoutCheck: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, checks: &mut Assertions<'_>);
}

/// [`LayoutCheck`] backed by a closure
pub struct CheckFn<F> {
    name: String,
    f: F,
}

impl<F> CheckFn<F>
where
    F: Fn(&mut Assertions<'_>) + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> LayoutCheck for CheckFn<F>
where
    F: Fn(&mut Assertions<'_>) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, checks: &mut Assertions<'_>) {
        (self.f)(checks)
    }
}

/// One loaded snapshot, owned for the duration of a single run
pub struct TestCase {
    name: String,
    snapshot_path: Option<PathBuf>,
    snapshot: Snapshot,
}

impl TestCase {
    pub fn load(name: impl Into<String>, path: &Path) -> LayoutResult<Self> {
        let snapshot = Snapshot::load(path)?;
        Ok(Self {
            name: name.into(),
            snapshot_path: Some(path.to_path_buf()),
            snapshot,
        })
    }

    pub fn from_snapshot(name: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            name: name.into(),
            snapshot_path: None,
            snapshot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Run every check; snapshot invariant violations become warnings
    pub fn run(&self, check: &dyn LayoutCheck, convention: &dyn StyleConvention) -> CaseReport {
        let start = Instant::now();
        debug!("Running case: {}", self.name);

        let mut assertions = Assertions::new(&self.snapshot, convention);
        for issue in self.snapshot.lint() {
            assertions.warn(format!("Snapshot: {}", issue));
        }
        check.run(&mut assertions);

        let (errors, warnings) = assertions.into_findings();
        CaseReport {
            name: self.name.clone(),
            snapshot: self.snapshot_path.as_ref().map(|p| p.display().to_string()),
            passed: errors.is_empty(),
            errors,
            warnings,
            fatal: None,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub snapshot: Option<String>,
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,

    /// Set when the case could not run at all (missing or malformed snapshot)
    pub fatal: Option<String>,

    pub duration_ms: u64,
}

impl CaseReport {
    pub fn failed(name: impl Into<String>, snapshot: Option<&Path>, error: &LayoutError) -> Self {
        Self {
            name: name.into(),
            snapshot: snapshot.map(|p| p.display().to_string()),
            passed: false,
            errors: Vec::new(),
            warnings: Vec::new(),
            fatal: Some(error.to_string()),
            duration_ms: 0,
        }
    }

    /// The ✓/✗ line shown for this case
    pub fn summary_line(&self) -> String {
        if let Some(fatal) = &self.fatal {
            return format!("✗ {}: {}", self.name, fatal);
        }
        match (self.errors.len(), self.warnings.len()) {
            (0, 0) => format!("✓ {}: All checks passed", self.name),
            (0, w) => format!("✓ {}: passed with {} warning(s)", self.name, w),
            (e, _) => format!("✗ {}: {} error(s)", self.name, e),
        }
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary_line())?;
        for error in &self.errors {
            writeln!(f, "  ERROR: {}", error)?;
        }
        if !self.errors.is_empty() && !self.warnings.is_empty() {
            writeln!(f, "  {}: {} warning(s)", self.name, self.warnings.len())?;
        }
        for warning in &self.warnings {
            writeln!(f, "  WARNING: {}", warning)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::TailwindConvention;
    use crate::geometry::{Rect, Viewport};
    use crate::query::Query;
    use crate::snapshot::LayoutElement;

    fn case() -> TestCase {
        let mut button = LayoutElement::new("button", Rect::new(460, 260, 360, 40));
        button.element_type = Some("submit".to_string());
        button.text = "Continue".to_string();
        TestCase::from_snapshot("login", Snapshot::new(Viewport::default(), vec![button]))
    }

    #[test]
    fn test_warnings_do_not_fail_case() {
        let check = CheckFn::new("login", |a: &mut Assertions<'_>| {
            let button = a.assert_exists(&Query::tag("button").with_type("submit"), "");
            a.assert_transition_styling(button, "");
        });
        let report = case().run(&check, &TailwindConvention::default());
        assert!(report.passed);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.summary_line().starts_with("✓ login: passed with 1 warning"));
    }

    #[test]
    fn test_all_failures_are_collected() {
        let check = CheckFn::new("login", |a: &mut Assertions<'_>| {
            a.assert_exists(&Query::tag("h1"), "title");
            a.assert_not_exists(&Query::tag("button"), "");
            let button = a.find(&Query::tag("button"));
            a.assert_text_equals(button, "Sign in", "");
        });
        let report = case().run(&check, &TailwindConvention::default());
        assert!(!report.passed);
        assert_eq!(report.errors.len(), 3);

        let rendered = report.to_string();
        assert!(rendered.starts_with("✗ login: 3 error(s)\n"));
        assert!(rendered.contains("  ERROR: Element not found: h1 (title)\n"));
    }

    #[test]
    fn test_failed_report_renders_fatal() {
        let err = LayoutError::Format("missing field `elements`".to_string());
        let report = CaseReport::failed("broken", None, &err);
        assert!(!report.passed);
        assert_eq!(
            report.summary_line(),
            "✗ broken: Snapshot format error: missing field `elements`"
        );
    }
}
