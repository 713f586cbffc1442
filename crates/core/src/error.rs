//! Error types for layout checking
//!
//! Only file-level problems are errors. Failed assertions are accumulated on
//! the test case as plain messages and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Snapshot format error: {0}")]
    Format(String),

    #[error("Snapshot not found: {}", .0.display())]
    SnapshotNotFound(PathBuf),

    #[error("Scenario parse error: {0}")]
    Scenario(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Test case not found: {0}")]
    CaseNotFound(String),

    #[error("Check panicked: {0}")]
    Panicked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
