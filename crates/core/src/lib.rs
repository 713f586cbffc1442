//! Layout snapshot assertions
//!
//! This crate checks the rendered structure of a web page from a JSON
//! snapshot of element geometry and style (LayoutML) instead of comparing
//! pixels:
//! - Loads snapshots written by a browser capture step
//! - Looks elements up by tag, text and input type
//! - Runs existence, visibility, clipping, alignment, viewport and
//!   state-styling checks that accumulate errors and warnings
//! - Runs declarative YAML scenarios and aggregates results
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Capture step (external)                     │
//! │        page state ──> <name>.json (viewport + elements)     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Snapshot::load()              missing visibleRect -> rect  │
//! │    └── find_first / find_all(Query { tag, text?, type? })   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestCase::run(&dyn LayoutCheck, &dyn StyleConvention)      │
//! │    └── Assertions { errors, warnings }                      │
//! │          ├── exists / not_exists / visible / in_viewport    │
//! │          ├── fully_visible (clip record)                    │
//! │          ├── aligned { left | right | center }              │
//! │          └── enabled / disabled / error / transition        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── run_case(snapshot, check) -> CaseReport              │
//! │    ├── run_all() over scenarios/*.yaml -> SuiteResult       │
//! │    └── write_results() -> layout-results.json               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod assertions;
pub mod case;
pub mod convention;
pub mod error;
pub mod geometry;
pub mod query;
pub mod runner;
pub mod scenario;
pub mod snapshot;
pub mod visibility;

pub use assertions::{Assertions, Severity};
pub use case::{CaseReport, CheckFn, LayoutCheck, TestCase};
pub use convention::{StyleConvention, TailwindConvention};
pub use error::{LayoutError, LayoutResult};
pub use geometry::{Edge, Rect, Viewport};
pub use query::Query;
pub use runner::{RunnerConfig, SuiteResult, TestRunner};
pub use scenario::{CheckStep, Scenario};
pub use snapshot::{ComputedStyle, LayoutElement, Snapshot};
pub use visibility::VisibilityInfo;
