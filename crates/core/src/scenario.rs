//! Declarative YAML test cases

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::assertions::{Assertions, Severity};
use crate::case::LayoutCheck;
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Edge;
use crate::query::Query;

/// A named set of checks against one snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this case
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Snapshot file, relative to the snapshot directory
    pub snapshot: PathBuf,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Checks to run, in order
    #[serde(default)]
    pub checks: Vec<CheckStep>,
}

/// A single check in a scenario.
///
/// Element-level checks whose element is absent do nothing; pair them with
/// an `exists` check to report the absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckStep {
    Exists {
        element: Query,
        #[serde(default)]
        message: String,
    },

    NotExists {
        element: Query,
        #[serde(default)]
        message: String,
    },

    Visible {
        element: Query,
        #[serde(default)]
        message: String,
    },

    FullyVisible {
        element: Query,
        #[serde(default)]
        message: String,
    },

    InViewport {
        element: Query,
        #[serde(default)]
        message: String,
    },

    Aligned {
        a: Query,
        b: Query,
        #[serde(default = "default_edge")]
        edge: Edge,
        #[serde(default = "default_alignment_tolerance")]
        tolerance: f64,
        #[serde(default)]
        message: String,
    },

    Enabled {
        element: Query,
        #[serde(default)]
        message: String,
    },

    Disabled {
        element: Query,
        #[serde(default)]
        message: String,
    },

    DisabledStyles {
        element: Query,
        #[serde(default)]
        message: String,
    },

    ErrorStyling {
        element: Query,
        #[serde(default)]
        message: String,
    },

    TransitionStyling {
        element: Query,
        #[serde(default)]
        message: String,
    },

    TextEquals {
        element: Query,
        expected: String,
        #[serde(default)]
        message: String,
    },

    ValueEquals {
        element: Query,
        #[serde(default)]
        expected: String,
        #[serde(default)]
        message: String,
    },

    PlaceholderEquals {
        element: Query,
        expected: String,
        #[serde(default)]
        message: String,
    },

    HasClass {
        element: Query,
        class: String,
        #[serde(default = "default_warning")]
        severity: Severity,
        #[serde(default)]
        message: String,
    },

    Centered {
        element: Query,
        #[serde(default = "default_center_tolerance")]
        tolerance: f64,
        #[serde(default)]
        message: String,
    },

    Below {
        element: Query,
        reference: Query,
        #[serde(default)]
        message: String,
    },

    NotRightOf {
        element: Query,
        reference: Query,
        #[serde(default)]
        message: String,
    },

    ElementCount {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
        #[serde(default = "default_warning")]
        severity: Severity,
        #[serde(default)]
        message: String,
    },
}

fn default_edge() -> Edge {
    Edge::Left
}

fn default_alignment_tolerance() -> f64 {
    5.0
}

fn default_center_tolerance() -> f64 {
    10.0
}

fn default_warning() -> Severity {
    Severity::Warning
}

impl CheckStep {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckStep::Exists { .. } => "exists",
            CheckStep::NotExists { .. } => "not_exists",
            CheckStep::Visible { .. } => "visible",
            CheckStep::FullyVisible { .. } => "fully_visible",
            CheckStep::InViewport { .. } => "in_viewport",
            CheckStep::Aligned { .. } => "aligned",
            CheckStep::Enabled { .. } => "enabled",
            CheckStep::Disabled { .. } => "disabled",
            CheckStep::DisabledStyles { .. } => "disabled_styles",
            CheckStep::ErrorStyling { .. } => "error_styling",
            CheckStep::TransitionStyling { .. } => "transition_styling",
            CheckStep::TextEquals { .. } => "text_equals",
            CheckStep::ValueEquals { .. } => "value_equals",
            CheckStep::PlaceholderEquals { .. } => "placeholder_equals",
            CheckStep::HasClass { .. } => "has_class",
            CheckStep::Centered { .. } => "centered",
            CheckStep::Below { .. } => "below",
            CheckStep::NotRightOf { .. } => "not_right_of",
            CheckStep::ElementCount { .. } => "element_count",
        }
    }

    pub fn apply(&self, a: &mut Assertions<'_>) {
        match self {
            CheckStep::Exists { element, message } => {
                a.assert_exists(element, message);
            }
            CheckStep::NotExists { element, message } => a.assert_not_exists(element, message),
            CheckStep::Visible { element, message } => {
                let el = a.find(element);
                a.assert_visible(el, message)
            }
            CheckStep::FullyVisible { element, message } => {
                let el = a.find(element);
                a.assert_fully_visible(el, message)
            }
            CheckStep::InViewport { element, message } => {
                let el = a.find(element);
                a.assert_in_viewport(el, message)
            }
            CheckStep::Aligned { a: first, b: second, edge, tolerance, message } => {
                let (first, second) = (a.find(first), a.find(second));
                a.assert_aligned(first, second, *edge, *tolerance, message)
            }
            CheckStep::Enabled { element, message } => {
                let el = a.find(element);
                a.assert_enabled(el, message)
            }
            CheckStep::Disabled { element, message } => {
                let el = a.find(element);
                a.assert_disabled(el, message)
            }
            CheckStep::DisabledStyles { element, message } => {
                let el = a.find(element);
                a.assert_has_disabled_styles(el, message)
            }
            CheckStep::ErrorStyling { element, message } => {
                let el = a.find(element);
                a.assert_error_styling(el, message)
            }
            CheckStep::TransitionStyling { element, message } => {
                let el = a.find(element);
                a.assert_transition_styling(el, message)
            }
            CheckStep::TextEquals { element, expected, message } => {
                let el = a.find(element);
                a.assert_text_equals(el, expected, message)
            }
            CheckStep::ValueEquals { element, expected, message } => {
                let el = a.find(element);
                a.assert_value_equals(el, expected, message)
            }
            CheckStep::PlaceholderEquals { element, expected, message } => {
                let el = a.find(element);
                a.assert_placeholder_equals(el, expected, message)
            }
            CheckStep::HasClass { element, class, severity, message } => {
                let el = a.find(element);
                a.assert_has_class(el, class, *severity, message)
            }
            CheckStep::Centered { element, tolerance, message } => {
                let el = a.find(element);
                a.assert_centered(el, *tolerance, message)
            }
            CheckStep::Below { element, reference, message } => {
                let (el, reference) = (a.find(element), a.find(reference));
                a.assert_below(el, reference, message)
            }
            CheckStep::NotRightOf { element, reference, message } => {
                let (el, reference) = (a.find(element), a.find(reference));
                a.assert_not_right_of(el, reference, message)
            }
            CheckStep::ElementCount { min, max, severity, message } => {
                a.assert_element_count(*min, *max, *severity, message)
            }
        }
    }
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> LayoutResult<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> LayoutResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            LayoutError::Scenario(msg) => LayoutError::Scenario(format!("{}: {}", path.display(), msg)),
            other => LayoutError::Scenario(format!("{}: {}", path.display(), other)),
        })
    }

    /// Every scenario file under `dir`, parsed or not, in path order
    pub fn discover(dir: &Path) -> Vec<(PathBuf, LayoutResult<Self>)> {
        let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        debug!("Discovered {} scenario file(s) in {}", paths.len(), dir.display());

        paths
            .into_iter()
            .map(|path| {
                let parsed = Self::from_file(&path);
                (path, parsed)
            })
            .collect()
    }

    /// Load all scenarios under `dir`, failing on the first invalid file
    pub fn load_all(dir: &Path) -> LayoutResult<Vec<Self>> {
        Self::discover(dir).into_iter().map(|(_, parsed)| parsed).collect()
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(scenarios: &'a [Self], tag: &str) -> Vec<&'a Self> {
        scenarios.iter().filter(|s| s.has_tag(tag)).collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn validate(&self) -> LayoutResult<()> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::Scenario("scenario name must not be empty".to_string()));
        }
        if self.snapshot.as_os_str().is_empty() {
            return Err(LayoutError::Scenario(format!(
                "scenario '{}' does not name a snapshot file",
                self.name
            )));
        }
        Ok(())
    }
}

impl LayoutCheck for Scenario {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, checks: &mut Assertions<'_>) {
        for step in &self.checks {
            debug!("{}: {}", self.name, step.kind());
            step.apply(checks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let yaml = r#"
name: auth-initial
description: Email step of the sign-in page
snapshot: Auth.razor.Initial.json
tags:
  - auth
  - smoke
checks:
  - check: exists
    element: { tag: input, type: email }
    message: Email input field should exist
  - check: aligned
    a: { tag: input, type: email }
    b: { tag: button, type: submit }
    edge: right
    tolerance: 1
  - check: has_class
    element: { tag: h1, text: Auto }
    class: font-mono
  - check: element_count
    min: 6
    max: 8
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "auth-initial");
        assert_eq!(scenario.snapshot, PathBuf::from("Auth.razor.Initial.json"));
        assert_eq!(scenario.checks.len(), 4);
        assert!(scenario.has_tag("smoke"));

        match &scenario.checks[1] {
            CheckStep::Aligned { edge, tolerance, .. } => {
                assert_eq!(*edge, Edge::Right);
                assert_eq!(*tolerance, 1.0);
            }
            other => panic!("unexpected step: {:?}", other),
        }
        match &scenario.checks[2] {
            CheckStep::HasClass { severity, .. } => assert_eq!(*severity, Severity::Warning),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_aligned_defaults() {
        let yaml = r#"
name: defaults
snapshot: page.json
checks:
  - check: aligned
    a: { tag: label }
    b: { tag: input }
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        match &scenario.checks[0] {
            CheckStep::Aligned { edge, tolerance, .. } => {
                assert_eq!(*edge, Edge::Left);
                assert_eq!(*tolerance, 5.0);
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        let yaml = r#"
name: bad
snapshot: page.json
checks:
  - check: pixel_diff
    element: { tag: div }
"#;
        assert!(Scenario::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_file_errors_name_the_path_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("unnamed.yaml");
        std::fs::write(&path, "name: ''\nsnapshot: page.json\n").unwrap();

        let message = Scenario::from_file(&path).unwrap_err().to_string();
        assert_eq!(
            message,
            format!("Scenario parse error: {}: scenario name must not be empty", path.display())
        );
        assert_eq!(message.matches("Scenario parse error").count(), 1);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = Scenario::from_yaml("name: ''\nsnapshot: page.json\n").unwrap_err();
        assert!(matches!(err, LayoutError::Scenario(_)));
    }
}
